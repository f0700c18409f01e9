//! Golem Roster
//!
//! Practitioner roster table and the hierarchical filter engine.
//!
//! # Overview
//!
//! - **Roster**: read-only table of shared [`PractitionerRecord`]s
//! - **FilterPredicate**: secondary row test, composed by AND
//! - **FilterEngine**: code filter → predicates → grouping, with revert to
//!   the last good view on schema mismatch
//! - **FilterKind**: optional filter catalogue and its UI controls

#![warn(missing_docs)]

pub mod column;
pub mod controls;
pub mod engine;
pub mod error;
pub mod predicate;
pub mod record;
pub mod table;

// Re-exports
pub use column::{Cell, CellKey, Column, ColumnKind};
pub use controls::{controls, FilterChoice, FilterControl, FilterKind};
pub use engine::{FilterEngine, FilterOutcome, FilterRequest, FilterView};
pub use error::{Result, SchemaMismatchError};
pub use predicate::FilterPredicate;
pub use record::PractitionerRecord;
pub use table::Roster;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
