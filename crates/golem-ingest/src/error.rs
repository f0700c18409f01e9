//! Error types for file ingestion.

use std::path::PathBuf;

/// Errors loading the taxonomy or the roster
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Taxonomy document is not valid JSON
    #[error("invalid taxonomy JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Roster file is not valid CSV or a cell failed to coerce
    #[error("invalid roster CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Taxonomy document root is not a JSON object
    #[error("taxonomy root must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

impl IngestError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;
