use std::{collections::BTreeMap, fs, path::Path};

use biblatex::{Bibliography, Chunk, Person, Spanned};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    entry::{Entry, EntryKind},
    error::{Error, Result},
};

/// Read and parse the bibliography at `path`.
pub fn load(path: &Path) -> Result<Vec<Entry>> {
    let source = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&source, path)
}

/// Parse BibTeX `source` into entries, in the order they appear. `origin` is only
/// used to label parse errors.
pub fn parse(source: &str, origin: &Path) -> Result<Vec<Entry>> {
    let bibliography = Bibliography::parse(source).map_err(|e| Error::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let entries: Vec<Entry> = bibliography.iter().map(convert).collect();
    tracing::debug!(count = entries.len(), path = %origin.display(), "loaded bibliography");
    Ok(entries)
}

fn convert(entry: &biblatex::Entry) -> Entry {
    let authors = entry
        .author()
        .unwrap_or_default()
        .iter()
        .map(merge_name)
        .filter(|name| !name.is_empty())
        .collect();

    let fields = entry
        .fields
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("author"))
        .map(|(name, value)| (name.to_lowercase(), chunks_to_string(value)))
        .collect::<BTreeMap<_, _>>();

    // An unrecognised month stays only in `fields`; the date deriver reports it.
    let month = fields.get("month").and_then(|raw| parse_month(raw));

    Entry {
        id: entry.key.clone(),
        kind: EntryKind::from(entry.entry_type.to_string().as_str()),
        authors,
        month,
        fields,
    }
}

fn chunks_to_string(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            Chunk::Normal(s) | Chunk::Verbatim(s) => s.clone(),
            Chunk::Math(s) => format!("${s}$"),
        })
        .collect::<String>()
}

/// Merge the parts of a name first-name-first: `given prefix family, suffix`.
fn merge_name(person: &Person) -> String {
    let mut name = [&person.given_name, &person.prefix, &person.name]
        .into_iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let suffix = person.suffix.trim();
    if !suffix.is_empty() {
        name.push_str(", ");
        name.push_str(suffix);
    }
    name
}

/// Normalise a month field to `1..=12`. Accepts numbers, English month names, and
/// their three-letter abbreviations, in any case.
pub fn parse_month(raw: &str) -> Option<u32> {
    static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0*(\d{1,2})$").unwrap());

    let raw = raw.trim().trim_end_matches('.');
    if let Some(caps) = NUMERIC_RE.captures(raw) {
        let n: u32 = caps[1].parse().ok()?;
        return (1..=12).contains(&n).then_some(n);
    }
    if raw.eq_ignore_ascii_case("sept") {
        return Some(9);
    }
    raw.parse::<chrono::Month>()
        .ok()
        .map(|m| m.number_from_month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(source: &str) -> Vec<Entry> {
        parse(source, Path::new("test.bib")).expect("should parse")
    }

    #[test]
    fn entries_keep_file_order() {
        let entries = parse_str(
            r#"
@article{zeta, title = {Z}, author = {Doe, Jane}, year = 2020}
@misc{alpha, title = {A}, author = {Roe, Rick}, year = 2021}
@techreport{mid, title = {M}, author = {Poe, Edgar}, year = 2019}
"#,
        );
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
        assert_eq!(entries[2].kind, EntryKind::TechReport);
    }

    #[test]
    fn authors_are_split_and_merged_first_name_first() {
        let entries = parse_str(
            r#"@article{x,
  title = {T},
  author = {Doe, Jane Q. and Richard Roe and van Beethoven, Ludwig and Smith, Jr., John},
  year = 2020
}"#,
        );
        assert_eq!(
            entries[0].authors,
            [
                "Jane Q. Doe",
                "Richard Roe",
                "Ludwig van Beethoven",
                "John Smith, Jr."
            ]
        );
        assert_eq!(entries[0].field("author"), None);
    }

    #[test]
    fn missing_author_gives_empty_list() {
        let entries = parse_str("@misc{x, title = {T}, year = 2020}");
        assert!(entries[0].authors.is_empty());
    }

    #[test]
    fn month_is_normalised() {
        let entries = parse_str(
            r#"
@misc{a, title = {A}, year = 2020, month = {May}}
@misc{b, title = {B}, year = 2020, month = {11}}
@misc{c, title = {C}, year = 2020, month = {sep}}
@misc{d, title = {D}, year = 2020}
"#,
        );
        let months: Vec<_> = entries.iter().map(|e| e.month).collect();
        assert_eq!(months, [Some(5), Some(11), Some(9), None]);
    }

    #[test]
    fn unknown_month_is_left_for_later() {
        let entries = parse_str("@misc{a, title = {A}, year = 2020, month = {Smarch}}");
        assert_eq!(entries[0].month, None);
        assert_eq!(entries[0].field("month"), Some("Smarch"));
    }

    #[test]
    fn fields_are_plain_text() {
        let entries = parse_str(
            r#"@article{x, title = {Fast {Sparse} Kernels}, author = {A, B}, journal = {J},
  doi = {10.1145/3519939}, year = {2022}}"#,
        );
        let e = &entries[0];
        assert_eq!(e.field("doi"), Some("10.1145/3519939"));
        assert_eq!(e.field("journal"), Some("J"));
        assert_eq!(e.field("year"), Some("2022"));
        assert!(e.field("title").unwrap().contains("Sparse"));
    }

    #[test]
    fn math_in_titles_keeps_its_delimiters() {
        let entries = parse_str(
            r#"@article{x, title = {An $O(n \log n)$ Sort for {GPU}s}, author = {A, B}, year = 2020}"#,
        );
        assert_eq!(
            entries[0].field("title"),
            Some(r"An $O(n \log n)$ Sort for GPUs")
        );
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        let err = parse("@article{x, title = {unterminated", Path::new("bad.bib")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got {err:?}");
        assert!(err.to_string().contains("bad.bib"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.bib")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn parse_month_accepts_names_and_abbreviations() {
        assert_eq!(parse_month("January"), Some(1));
        assert_eq!(parse_month("feb"), Some(2));
        assert_eq!(parse_month("DEC"), Some(12));
        assert_eq!(parse_month("Sept."), Some(9));
        assert_eq!(parse_month("05"), Some(5));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month(""), None);
    }

    #[test]
    fn parse_month_accepts_every_number_in_range() {
        proptest::proptest!(|(n in 1u32..=12, pad in 0usize..3)| {
            let raw = format!("{}{}", "0".repeat(pad), n);
            proptest::prop_assert_eq!(parse_month(&raw), Some(n));
        })
    }
}
