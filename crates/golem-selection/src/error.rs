//! Error types for the selection store.

/// Selection and export errors
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// Export index past the end of the user's selection
    #[error("row {index} is out of range for a selection of {len} rows")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Selection length
        len: usize,
    },

    /// Writing the export failed
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;
