//! Golem Core - FastGolem service
//!
//! Ties the taxonomy index, the roster filter engine and the selection store
//! together:
//! - browse Groups, Classifications and Specializations
//! - resolve a selection to taxon codes
//! - filter the practitioner roster per user session
//! - accumulate and export user selections
//!
//! # Example
//!
//! ```rust
//! use golem_core::prelude::*;
//!
//! # fn example() -> golem_core::Result<()> {
//! let tree = TaxonomyNode::new().with_child(
//!     "A",
//!     TaxonomyNode::new().with_child("X", TaxonomyNode::leaf(LeafValue::new("1"))),
//! );
//! let roster = Roster::new(vec![PractitionerRecord {
//!     full_name: Some("Ann Lee".into()),
//!     taxon_code: Some("1".into()),
//!     ..Default::default()
//! }]);
//!
//! let golem = Golem::new(&tree, roster, GolemConfig::new())?;
//! let request = golem.request(&SelectionPath::new(["A"])?)?;
//!
//! let mut session = golem.session("ann");
//! assert_eq!(session.run(&request).row_count(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod service;
pub mod session;

// Re-exports for convenience
pub use config::{ConfigError, GolemConfig};
pub use error::{GolemError, Result};
pub use service::Golem;
pub use session::Session;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with FastGolem
    pub use crate::{Golem, GolemConfig, GolemError, Session};
    pub use golem_roster::{
        Column, FilterChoice, FilterControl, FilterKind, FilterOutcome, FilterPredicate, FilterRequest,
        FilterView, PractitionerRecord, Roster,
    };
    pub use golem_selection::{ExportOptions, UserId};
    pub use golem_taxonomy::{LeafValue, Resolution, ResolutionKind, SelectionPath, TaxonomyNode};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
