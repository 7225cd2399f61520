use std::path::{Path, PathBuf};

use crate::{
    entry::Entry,
    error::{Error, Result},
};

mod venue;

const UNKNOWN_VENUE: &str = "Unknown Venue";

/// The rendered Markdown block for one entry, ending in a newline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Renders entries as Markdown. Holds where local PDFs live so it can decide whether
/// to offer a download link.
pub struct Formatter {
    root: PathBuf,
    documents_dir: String,
}

impl Formatter {
    /// `documents_dir` is relative both to `root` on disk and to the site root in links.
    pub fn new(root: impl Into<PathBuf>, documents_dir: &str) -> Self {
        Formatter {
            root: root.into(),
            documents_dir: documents_dir.trim_matches('/').to_string(),
        }
    }

    pub fn format_entry(&self, entry: &Entry) -> Result<Fragment> {
        let title = required(entry, "title", entry.field("title").map(strip_braces))?;
        let authors = required(entry, "author", join_authors(&entry.authors))?;
        let year = required(entry, "year", entry.field("year").map(|y| y.trim().to_string()))?;
        let url = required(entry, "url", link_url(entry))?;
        let month = month_display(entry.month);

        let venue = match venue::resolve(entry) {
            Some((rule, venue)) => {
                tracing::debug!(entry = %entry.id, rule, "resolved venue");
                strip_braces(&venue)
            }
            None => {
                tracing::warn!("Unknown venue for entry {}", entry.id);
                UNKNOWN_VENUE.to_string()
            }
        };

        let mut markdown = format!(
            "### {title}\n{authors}, “{title},” {venue}, {month}{year}.\n[Link]({url})."
        );
        if let Some(path) = self.download_path(entry) {
            markdown.push_str(&format!(" [Download](/{path})."));
        }
        markdown.push('\n');
        Ok(Fragment(markdown))
    }

    /// The site-relative path of the entry's PDF, if one exists under the project root.
    fn download_path(&self, entry: &Entry) -> Option<String> {
        let path = if self.documents_dir.is_empty() {
            format!("{}.pdf", entry.id)
        } else {
            format!("{}/{}.pdf", self.documents_dir, entry.id)
        };
        if self.root.join(Path::new(&path)).is_file() {
            Some(path)
        } else {
            tracing::warn!("File {path} not found");
            None
        }
    }
}

fn required(entry: &Entry, field: &'static str, value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::MissingField {
            entry: entry.id.clone(),
            field,
        })
}

/// Drop the braces BibTeX uses to protect capitalisation.
pub fn strip_braces(s: &str) -> String {
    s.replace(['{', '}'], "")
}

/// `A`, `A, and B`, `A, B, and C`: every name but the last is followed by a comma, and
/// the last is introduced by `and`.
pub fn join_authors(authors: &[String]) -> Option<String> {
    match authors {
        [] => None,
        [only] => Some(only.clone()),
        [rest @ .., last] => Some(format!("{}, and {last}", rest.join(", "))),
    }
}

/// Full month name followed by a space, or nothing.
pub fn month_display(month: Option<u32>) -> String {
    month
        .and_then(|m| u8::try_from(m).ok())
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| format!("{} ", m.name()))
        .unwrap_or_default()
}

/// DOI resolver link when a DOI is known, else the entry's own URL.
pub fn link_url(entry: &Entry) -> Option<String> {
    match (entry.field("doi"), entry.field("url")) {
        (Some(doi), _) => Some(format!("https://doi.org/{doi}")),
        (None, Some(url)) => Some(url.to_string()),
        (None, None) => None,
    }
}
