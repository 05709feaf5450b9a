//! Error type shared by every colex-core operation.
//!
//! Every variant is fatal to the operation that raised it. An unresolved concept
//! name is not an error: it is reported as [`SearchOutcome::Unresolved`].
//!
//! [`SearchOutcome::Unresolved`]: crate::SearchOutcome::Unresolved

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColexError {
    /// The database file does not exist. It is never created on demand.
    #[error("database not found at {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("required table `{0}` is missing from the database")]
    MissingTable(&'static str),

    #[error("table `{table}` is missing required column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed `config.toml`, or no home directory to look for one in.
    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ColexError>;

impl From<ColexError> for std::io::Error {
    fn from(e: ColexError) -> Self {
        match e {
            ColexError::Io(io) => io,
            ColexError::DatabaseNotFound(_) => Self::new(std::io::ErrorKind::NotFound, e),
            other => Self::other(other),
        }
    }
}
