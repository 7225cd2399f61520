use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Convert a BibTeX bibliography into a Markdown publications page
pub struct Cli {
    /// Bibliography to read
    #[arg(value_name = "BIB", default_value = "Website.bib")]
    pub input: PathBuf,

    /// Markdown page to write; overwritten if it exists
    #[arg(short, long, value_name = "FILE", default_value = "publications.md")]
    pub output: PathBuf,

    /// Project root that local documents are looked up under
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Directory holding `<key>.pdf` downloads, relative to the root and the site
    #[arg(long, value_name = "DIR", default_value = "assets/documents")]
    pub documents_dir: String,

    /// Link target of the CV line at the top of the page
    #[arg(long, value_name = "URL", default_value = "/assets/documents/willow_ahrens_cv.pdf")]
    pub cv: String,

    /// Skip entries with missing or invalid required fields instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Log more (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "bib2md=info",
            1 => "bib2md=debug",
            _ => "bib2md=trace",
        }
    }
}
