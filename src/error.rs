//! Error types for hll-validate
//!
//! Every variant here is fatal for the invocation that raised it. A zero mean in
//! the summary table is not an error: it shows up as a non-finite RSE value.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// hll-validate error types
#[derive(Error, Debug)]
pub enum Error {
    /// Input table could not be opened
    #[error("Input not found: {}", path.display())]
    InputNotFound {
        /// Path that was requested
        path: PathBuf,
        /// Underlying open failure
        source: std::io::Error,
    },

    /// Required column absent or unusable
    #[error("Schema error in {}: column `{column}` {reason}", path.display())]
    Schema {
        /// Table the column was expected in
        path: PathBuf,
        /// Column name
        column: String,
        /// What is wrong with it
        reason: String,
    },

    /// Command parameter outside its domain (e.g. negative `B`)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Aggregation window reduced to nothing
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Table could be opened but not decoded (CSV/Parquet)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Chart could not be drawn or written
    #[error("Failed to render chart to {}: {message}", path.display())]
    Render {
        /// Destination image
        path: PathBuf,
        /// Backend failure message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn schema(
        path: impl Into<PathBuf>,
        column: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Schema {
            path: path.into(),
            column: column.into(),
            reason: reason.into(),
        }
    }
}
