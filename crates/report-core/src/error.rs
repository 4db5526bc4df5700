use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the variant report tool.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A required input was not supplied or does not exist.
    #[error("Missing input: {0}")]
    InputMissing(String),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tabular event source could not be decoded.
    #[error("Failed to decode event data: {0}")]
    Decode(String),

    /// The rule document is not well-formed XML.
    #[error("Failed to parse rule document: {0}")]
    RuleParse(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;
