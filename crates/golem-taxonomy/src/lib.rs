//! Golem Taxonomy
//!
//! NUCC taxonomy tree index and code resolution.
//!
//! # Overview
//!
//! - **TaxonomyNode**: tagged tree node (leaf value and children are independent)
//! - **TreeIndex**: radix-tree lookup of children, subtree codes and the flattened table
//! - **CodeResolver**: selection path → set of taxon codes, with literal fallback
//!
//! # Example
//!
//! ```rust
//! use golem_taxonomy::{CodeResolver, LeafValue, SelectionPath, TaxonomyNode, TreeIndex};
//!
//! let tree = TaxonomyNode::new().with_child(
//!     "A",
//!     TaxonomyNode::new()
//!         .with_child("X", TaxonomyNode::leaf(LeafValue::new("1")))
//!         .with_child("Y", TaxonomyNode::leaf(LeafValue::new("2"))),
//! );
//!
//! let index = TreeIndex::build(&tree);
//! assert_eq!(index.groups(), ["A"]);
//!
//! let path = SelectionPath::new(["A"]).unwrap();
//! let resolution = CodeResolver::new(&index).resolve(&path).unwrap();
//! assert_eq!(resolution.codes.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod index;
pub mod node;
pub mod path;
pub mod resolver;

// Re-exports
pub use index::{FlattenedPath, TreeIndex};
pub use node::{LeafValue, MalformedTreeError, TaxonomyNode};
pub use path::{Level, PathError, SelectionPath};
pub use resolver::{CodeResolver, CodeSet, Resolution, ResolutionKind, ResolveError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
