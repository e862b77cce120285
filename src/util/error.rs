//! Error types for the metadata index.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for metadata loading and decoding.
///
/// Every variant is fatal to construction: there is no partial index.
/// Recoverable conditions (an ego pose matching no sample data) are
/// diagnosed via `tracing` and never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// Source collection file does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Source collection could not be decoded (bad JSON or a missing
    /// required field)
    #[error("Failed to decode {file}: {source}")]
    Json {
        file: PathBuf,
        source: serde_json::Error,
    },

    /// Scene name does not match the expected "scene-<digits>" pattern
    #[error("Invalid scene name {0:?}: expected \"scene-<digits>\"")]
    InvalidSceneName(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for metadata operations.
pub type Result<T> = std::result::Result<T, Error>;
