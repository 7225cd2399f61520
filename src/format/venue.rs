use crate::entry::{Entry, EntryKind};

type VenueRule = fn(&Entry) -> Option<String>;

/// Venue rules, tried in order.
///
/// NOTE: Ordering is important here, as it signifies priority. The first rule that yields a
/// value decides the venue, so a thesis that also carries a `publisher` is listed under the
/// publisher.
static VENUE_RULES: &[(&str, VenueRule)] = &[
    ("journal", journal),
    ("series", series),
    ("publisher", publisher),
    ("mastersthesis", masters_thesis),
    ("techreport", tech_report),
    ("publication", publication),
];

fn field(entry: &Entry, name: &str) -> Option<String> {
    entry.field(name).map(str::to_string)
}

fn journal(entry: &Entry) -> Option<String> {
    field(entry, "journal")
}

fn series(entry: &Entry) -> Option<String> {
    field(entry, "series")
}

fn publisher(entry: &Entry) -> Option<String> {
    field(entry, "publisher")
}

fn publication(entry: &Entry) -> Option<String> {
    field(entry, "publication")
}

fn masters_thesis(entry: &Entry) -> Option<String> {
    match entry.kind {
        EntryKind::MastersThesis => entry
            .field("school")
            .map(|school| format!("Master's Thesis, {school}")),
        _ => None,
    }
}

fn tech_report(entry: &Entry) -> Option<String> {
    match entry.kind {
        EntryKind::TechReport => field(entry, "institution"),
        _ => None,
    }
}

/// Find the venue of `entry`, together with the name of the rule that produced it.
pub fn resolve(entry: &Entry) -> Option<(&'static str, String)> {
    VENUE_RULES
        .iter()
        .find_map(|(name, rule)| rule(entry).map(|venue| (*name, venue)))
}
