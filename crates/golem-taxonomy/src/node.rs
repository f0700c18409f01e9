//! Taxonomy tree nodes
//!
//! A node may carry a leaf value, children, or both; the two are independent.

use crate::path::SelectionPath;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Code and definition attached to a taxonomy node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafValue {
    /// Stable taxon code joining the node to roster rows
    pub code: String,
    /// Free-text definition (may be empty)
    #[serde(default)]
    pub definition: String,
}

impl LeafValue {
    /// Create leaf value with empty definition
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            definition: String::new(),
        }
    }

    /// With definition
    #[inline]
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }
}

/// Node in the taxonomy tree
///
/// The root is an unnamed node whose children are Group names. Children keep
/// the insertion order of the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyNode {
    leaf: Option<LeafValue>,
    children: IndexMap<String, TaxonomyNode>,
}

impl TaxonomyNode {
    /// Create empty node
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create node carrying only a leaf value
    #[inline]
    #[must_use]
    pub fn leaf(value: LeafValue) -> Self {
        Self {
            leaf: Some(value),
            children: IndexMap::new(),
        }
    }

    /// Set the leaf value, keeping children
    #[inline]
    #[must_use]
    pub fn with_leaf(mut self, value: LeafValue) -> Self {
        self.leaf = Some(value);
        self
    }

    /// Append a child, replacing any existing child of the same name
    #[inline]
    #[must_use]
    pub fn with_child(mut self, name: impl Into<String>, child: TaxonomyNode) -> Self {
        self.insert_child(name, child);
        self
    }

    /// Insert a child in place
    pub fn insert_child(&mut self, name: impl Into<String>, child: TaxonomyNode) {
        self.children.insert(name.into(), child);
    }

    /// Set or clear the leaf value in place
    pub fn set_leaf(&mut self, value: Option<LeafValue>) {
        self.leaf = value;
    }

    /// Leaf value (if any)
    #[inline]
    #[must_use]
    pub fn leaf_value(&self) -> Option<&LeafValue> {
        self.leaf.as_ref()
    }

    /// Children in insertion order
    #[inline]
    pub fn children(&self) -> impl Iterator<Item = (&str, &TaxonomyNode)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Child by name
    #[inline]
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&TaxonomyNode> {
        self.children.get(name)
    }

    /// Number of immediate children
    #[inline]
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// True when the node has neither a leaf value nor children
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaf.is_none() && self.children.is_empty()
    }

    /// Walk down the tree along `path`
    #[must_use]
    pub fn descend(&self, path: &SelectionPath) -> Option<&TaxonomyNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }
}

/// A subtree that could not be indexed
///
/// Never fatal: the subtree is skipped and the build continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed taxonomy node at {path:?}: {reason}")]
pub struct MalformedTreeError {
    /// Names from the root down to the offending node
    pub path: Vec<String>,
    /// What was wrong with it
    pub reason: String,
}

impl MalformedTreeError {
    /// Create error for the node at `path`
    #[inline]
    #[must_use]
    pub fn new(path: Vec<String>, reason: impl Into<String>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_can_be_leaf_and_interior() {
        let node = TaxonomyNode::leaf(LeafValue::new("1"))
            .with_child("Child", TaxonomyNode::leaf(LeafValue::new("2")));

        assert_eq!(node.leaf_value().map(|v| v.code.as_str()), Some("1"));
        assert_eq!(node.child_count(), 1);
    }

    #[test]
    fn children_keep_insertion_order() {
        let node = TaxonomyNode::new()
            .with_child("Zeta", TaxonomyNode::new())
            .with_child("Alpha", TaxonomyNode::new());

        let names: Vec<_> = node.children().map(|(name, _)| name).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }

    #[test]
    fn descend_follows_path() {
        let tree = TaxonomyNode::new().with_child(
            "A",
            TaxonomyNode::new().with_child("X", TaxonomyNode::leaf(LeafValue::new("1"))),
        );

        let path = SelectionPath::new(["A", "X"]).unwrap();
        assert_eq!(
            tree.descend(&path).and_then(TaxonomyNode::leaf_value),
            Some(&LeafValue::new("1"))
        );
        assert!(tree.descend(&SelectionPath::new(["A", "Y"]).unwrap()).is_none());
        assert_eq!(tree.descend(&SelectionPath::root()), Some(&tree));
    }

    #[test]
    fn leaf_definition_builder() {
        let value = LeafValue::new("207X00000X").with_definition("Orthopaedic Surgery");
        assert_eq!(value.definition, "Orthopaedic Surgery");
    }
}
