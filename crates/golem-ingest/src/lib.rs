//! Golem Ingest
//!
//! Loaders that turn the taxonomy JSON document and the practitioner roster
//! CSV file into the in-memory structures the filter engine works on. Only
//! type coercion happens here; no schema validation.

#![warn(missing_docs)]

pub mod error;
pub mod roster;
pub mod tree;

// Re-exports
pub use error::{IngestError, Result};
pub use roster::{load_roster, read_roster};
pub use tree::{load_tree, parse_tree, tree_from_value, LoadedTree};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
