//! Error types for the FastGolem service
//!
//! Each layer keeps its own error enum; [`GolemError`] wraps them so callers
//! handle one type.

use crate::config::ConfigError;
use golem_ingest::IngestError;
use golem_roster::SchemaMismatchError;
use golem_selection::SelectionError;
use golem_taxonomy::{PathError, ResolveError};

/// Main service error type
#[derive(Debug, thiserror::Error)]
pub enum GolemError {
    /// Configuration could not be read or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input files could not be loaded
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// A required input file is not configured
    #[error("no {0} file configured")]
    MissingInput(&'static str),

    /// Selection path is not well formed
    #[error("invalid selection path: {0}")]
    Path(#[from] PathError),

    /// Selection path does not exist
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Filter step does not fit the roster schema
    #[error("schema mismatch: {0}")]
    Schema(#[from] SchemaMismatchError),

    /// Selection or export failed
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, GolemError>;
