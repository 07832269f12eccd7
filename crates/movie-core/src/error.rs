use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the movie analyzer crates.
#[derive(Error, Debug)]
pub enum MovieError {
    /// The dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset row does not have the expected column layout.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// A column value could not be converted to its typed field.
    #[error("Invalid {field} at line {line}: {value:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// The dataset file contained no usable rows.
    #[error("No movies found in {0}")]
    EmptyDataset(PathBuf),

    /// More ranked items were requested than the collection can supply.
    #[error("Requested top {requested} but only {available} available")]
    OutOfRange { requested: usize, available: usize },

    /// A sort key string is not one of the recognised keys.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the movie crates.
pub type Result<T> = std::result::Result<T, MovieError>;
