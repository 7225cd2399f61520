use std::collections::BTreeMap;

/// A single bibliography record, flattened out of the parser's representation.
///
/// Entries are built once by the loader and only read afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Citation key, unique within one bibliography.
    pub id: String,
    pub kind: EntryKind,
    /// Display names, already merged first-name-first.
    pub authors: Vec<String>,
    /// Month normalised to `1..=12`.
    pub month: Option<u32>,
    /// Remaining fields as plain text, keyed by lowercase field name.
    pub fields: BTreeMap<String, String>,
}

impl Entry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[cfg(test)]
impl Entry {
    pub fn new(id: impl Into<String>, kind: EntryKind) -> Self {
        Entry {
            id: id.into(),
            kind,
            authors: Vec::new(),
            month: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }
}

/// The entry type tag. Only the variants that change how an entry renders (or that
/// are common enough to name) get their own variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Article,
    InProceedings,
    MastersThesis,
    PhdThesis,
    TechReport,
    Misc,
    Other(String),
}

impl From<&str> for EntryKind {
    fn from(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "article" => EntryKind::Article,
            "inproceedings" | "conference" => EntryKind::InProceedings,
            "mastersthesis" => EntryKind::MastersThesis,
            "phdthesis" => EntryKind::PhdThesis,
            "techreport" => EntryKind::TechReport,
            "misc" => EntryKind::Misc,
            other => EntryKind::Other(other.to_string()),
        }
    }
}
