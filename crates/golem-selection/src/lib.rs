//! Golem Selection
//!
//! User-scoped selection store. Users accumulate rows picked from their
//! filtered views and export them as a delimited table.

#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod store;

// Re-exports
pub use error::{Result, SelectionError};
pub use export::{write_rows, ExportOptions};
pub use store::{SelectionStore, UserId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
