//! Taxonomy index with radix tree
//!
//! Provides [`TreeIndex`] for child lookup, subtree code collection and the
//! flattened path table, built once from a [`TaxonomyNode`].

use crate::node::{LeafValue, MalformedTreeError, TaxonomyNode};
use crate::path::{Level, SelectionPath};
use radix_trie::{Trie, TrieCommon};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Terminates every segment of a trie key.
///
/// Keys are `name US name US ...`, so a string prefix of a key is a path
/// prefix only at segment boundaries ("A" never matches "AB").
const SEGMENT_END: char = '\u{1f}';

/// One row of the flattened taxonomy table
///
/// Produced for every node carrying a leaf value. Levels below the node are
/// `None`; codes are not unique across rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlattenedPath {
    /// Group name
    pub group: Option<String>,
    /// Classification name
    pub classification: Option<String>,
    /// Specialization name
    pub specialization: Option<String>,
    /// Leaf code
    pub code: String,
    /// Leaf definition
    pub definition: String,
    /// Full path to the node
    #[serde(skip)]
    pub path: SelectionPath,
}

impl FlattenedPath {
    fn new(path: &SelectionPath, leaf: &LeafValue) -> Self {
        let level = |level| path.level(level).map(str::to_string);
        Self {
            group: level(Level::Group),
            classification: level(Level::Classification),
            specialization: level(Level::Specialization),
            code: leaf.code.clone(),
            definition: leaf.definition.clone(),
            path: path.clone(),
        }
    }
}

/// Indexed node stored in the trie
#[derive(Debug, Clone)]
struct IndexedNode {
    leaf: Option<LeafValue>,
    /// Sorted immediate child names
    children: Vec<String>,
}

/// Immutable lookup structure over a taxonomy tree
///
/// Every named node is stored in a radix trie keyed by its path, which gives:
/// - existence and child lookup for a [`SelectionPath`]
/// - iteration over a whole subtree when collecting codes
///
/// Malformed subtrees found while building are skipped and reported through
/// [`TreeIndex::malformed`].
#[derive(Debug)]
pub struct TreeIndex {
    trie: Trie<String, IndexedNode>,
    root: IndexedNode,
    flattened: Vec<FlattenedPath>,
    by_code: HashMap<String, Vec<SelectionPath>>,
    malformed: Vec<MalformedTreeError>,
}

impl TreeIndex {
    /// Build index from the root of a taxonomy tree
    ///
    /// Traversal is depth-first preorder: a node's leaf value is recorded
    /// before its children are visited in insertion order.
    #[must_use]
    pub fn build(root: &TaxonomyNode) -> Self {
        let mut index = Self {
            trie: Trie::new(),
            root: IndexedNode {
                leaf: None,
                children: Vec::new(),
            },
            flattened: Vec::new(),
            by_code: HashMap::new(),
            malformed: Vec::new(),
        };

        index.root = index.visit(root, &SelectionPath::root());

        tracing::info!(
            nodes = index.trie.len(),
            leaves = index.flattened.len(),
            skipped = index.malformed.len(),
            "Taxonomy index built"
        );
        index
    }

    fn visit(&mut self, node: &TaxonomyNode, path: &SelectionPath) -> IndexedNode {
        let leaf = match node.leaf_value() {
            Some(leaf) if leaf.code.trim().is_empty() => {
                self.skip(path, Vec::new(), "leaf value has a blank code");
                None
            }
            Some(leaf) => {
                self.flattened.push(FlattenedPath::new(path, leaf));
                self.by_code
                    .entry(leaf.code.clone())
                    .or_default()
                    .push(path.clone());
                Some(leaf.clone())
            }
            None => None,
        };

        let mut children = Vec::with_capacity(node.child_count());
        for (name, child) in node.children() {
            if name.trim().is_empty() || name.contains(SEGMENT_END) {
                self.skip(path, vec![name.to_string()], "child name is empty or not printable");
                continue;
            }

            let child_path = path.child(name);
            let indexed = self.visit(child, &child_path);
            self.trie.insert(trie_key(&child_path), indexed);
            children.push(name.to_string());
        }
        children.sort();

        IndexedNode { leaf, children }
    }

    fn skip(&mut self, parent: &SelectionPath, tail: Vec<String>, reason: &str) {
        let mut path = parent.segments().to_vec();
        path.extend(tail);
        tracing::warn!(path = ?path, reason, "Skipping malformed taxonomy node");
        self.malformed.push(MalformedTreeError::new(path, reason));
    }

    fn node(&self, path: &SelectionPath) -> Option<&IndexedNode> {
        if path.is_empty() {
            return Some(&self.root);
        }
        self.trie.get(&trie_key(path))
    }

    /// Check if path exists in the tree
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &SelectionPath) -> bool {
        self.node(path).is_some()
    }

    /// Sorted immediate child names at `path`
    ///
    /// Empty when the path does not exist or has no children; "no further
    /// choices" is not an error.
    #[must_use]
    pub fn children(&self, path: &SelectionPath) -> Vec<String> {
        self.node(path)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    /// Sorted Group names
    #[inline]
    #[must_use]
    pub fn groups(&self) -> Vec<String> {
        self.root.children.clone()
    }

    /// Leaf value of the node at `path`
    #[must_use]
    pub fn leaf(&self, path: &SelectionPath) -> Option<&LeafValue> {
        self.node(path).and_then(|node| node.leaf.as_ref())
    }

    /// Codes carried by the node at `path` and all its descendants
    ///
    /// Returns `None` when the path does not exist.
    #[must_use]
    pub fn subtree_codes(&self, path: &SelectionPath) -> Option<BTreeSet<String>> {
        if path.is_empty() {
            return Some(self.all_codes());
        }

        let key = trie_key(path);
        self.trie.get(&key)?;

        let codes = self
            .trie
            .get_raw_descendant(&key)
            .map(|subtrie| {
                subtrie
                    .values()
                    .filter_map(|node| node.leaf.as_ref())
                    .map(|leaf| leaf.code.clone())
                    .collect()
            })
            .unwrap_or_default();
        Some(codes)
    }

    /// Every code in the tree
    #[must_use]
    pub fn all_codes(&self) -> BTreeSet<String> {
        self.flattened.iter().map(|row| row.code.clone()).collect()
    }

    /// Flattened table in traversal order
    #[inline]
    #[must_use]
    pub fn flattened(&self) -> &[FlattenedPath] {
        &self.flattened
    }

    /// Every path whose leaf carries `code`, in traversal order
    #[must_use]
    pub fn paths_for_code(&self, code: &str) -> &[SelectionPath] {
        self.by_code.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    /// Subtrees skipped while building
    #[inline]
    #[must_use]
    pub fn malformed(&self) -> &[MalformedTreeError] {
        &self.malformed
    }

    /// Number of named nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Check if index has no named nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

fn trie_key(path: &SelectionPath) -> String {
    let mut key = String::new();
    for segment in path.iter() {
        key.push_str(segment);
        key.push(SEGMENT_END);
    }
    key
}
