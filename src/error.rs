use std::path::PathBuf;
use thiserror::Error;

/// Reasons a city table could not be loaded. An empty table is not an
/// error; it loads as `Ok` with no rows.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid timestamp in row {row}, column '{column}': {value:?}")]
    Timestamp {
        row: usize,
        column: &'static str,
        value: String,
    },
}
