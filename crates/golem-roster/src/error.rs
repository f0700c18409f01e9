//! Error types for roster filtering.

use crate::column::{Column, ColumnKind};

/// A filter step referenced a column that does not exist or holds the wrong
/// kind of value.
///
/// Aborts the one filter run that raised it; the engine keeps serving its
/// previous view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaMismatchError {
    /// No roster column has this name
    #[error("unknown column: '{0}'")]
    UnknownColumn(String),

    /// Column exists but holds another kind of value
    #[error("column '{column}' holds {found} values, filter needs {expected}")]
    WrongKind {
        /// Offending column
        column: Column,
        /// What the filter needs
        expected: &'static str,
        /// What the column holds
        found: ColumnKind,
    },
}

impl SchemaMismatchError {
    /// Name of the offending column
    #[must_use]
    pub fn column_name(&self) -> &str {
        match self {
            Self::UnknownColumn(name) => name,
            Self::WrongKind { column, .. } => column.display_name(),
        }
    }
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, SchemaMismatchError>;
