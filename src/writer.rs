use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    error::{Error, Result},
    format::Fragment,
};

/// Front matter plus the CV line that opens the page.
pub fn header(cv_link: &str) -> String {
    format!(
        "---\npermalink: /publications/\ntitle: \"Publications\"\n---\n\n[Curriculum Vitae]({cv_link})\n\n"
    )
}

/// The whole page: header, then fragments in the order given, separated by newlines.
pub fn render_page(fragments: &[Fragment], cv_link: &str) -> String {
    let body = fragments
        .iter()
        .map(Fragment::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    header(cv_link) + &body
}

/// Replace `path` with `contents`. The data is written to a temporary file next to the
/// destination and renamed over it, so a failed run never leaves a truncated page.
pub fn write(contents: &str, path: &Path) -> Result<()> {
    let err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = NamedTempFile::new_in(&dir).map_err(err)?;
    tmp.write_all(contents.as_bytes()).map_err(err)?;
    tmp.as_file().sync_all().map_err(err)?;
    tmp.persist(path).map_err(|e| err(e.error))?;
    Ok(())
}
