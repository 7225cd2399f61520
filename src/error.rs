use std::path::PathBuf;

/// Everything that can stop an entry, or the whole run, from being converted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse bibliography {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("entry `{entry}` is missing required field `{field}`")]
    MissingField { entry: String, field: &'static str },

    #[error("entry `{entry}` has invalid `{field}`: {value:?}")]
    InvalidField {
        entry: String,
        field: &'static str,
        value: String,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Problems confined to a single entry. Under `--keep-going` these are skipped
    /// instead of aborting the run.
    pub fn is_entry_local(&self) -> bool {
        matches!(self, Error::MissingField { .. } | Error::InvalidField { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
