use crate::{
    config::Config,
    date::{self, PublishedDate},
    entry::Entry,
    error::Result,
    format::{Formatter, Fragment},
    loader, writer,
};

/// How many entries made it onto the page, and how many were dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}

/// Load, sort, render, and write one publications page.
///
/// Nothing is written unless every step before the write succeeds. Entries with missing or
/// invalid fields abort the run, unless `keep_going` is set, in which case they are logged
/// and left off the page.
pub fn run(config: &Config) -> Result<Summary> {
    let entries = loader::load(&config.input)?;
    let formatter = Formatter::new(&config.root, &config.documents_dir);

    let mut rendered = Vec::with_capacity(entries.len());
    let mut summary = Summary::default();
    for entry in &entries {
        match render(&formatter, entry) {
            Ok(item) => rendered.push(item),
            Err(e) if config.keep_going && e.is_entry_local() => {
                tracing::warn!("Skipping entry {}: {e}", entry.id);
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    date::sort_newest_first(&mut rendered);
    let fragments: Vec<Fragment> = rendered.into_iter().map(|(_, f)| f).collect();
    summary.written = fragments.len();

    let page = writer::render_page(&fragments, &config.cv_link);
    writer::write(&page, &config.output)?;
    Ok(summary)
}

fn render(formatter: &Formatter, entry: &Entry) -> Result<(PublishedDate, Fragment)> {
    let date = date::published_date(entry)?;
    tracing::trace!(entry = %entry.id, date = %date.as_date(), "derived date");
    Ok((date, formatter.format_entry(entry)?))
}
