use std::path::PathBuf;

use crate::cli::Cli;

/// Everything one conversion run needs to know.
#[derive(Clone, Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub root: PathBuf,
    pub documents_dir: String,
    pub cv_link: String,
    pub keep_going: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            input: cli.input,
            output: cli.output,
            root: cli.root,
            documents_dir: cli.documents_dir,
            cv_link: cli.cv,
            keep_going: cli.keep_going,
        }
    }
}
