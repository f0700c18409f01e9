//! Code resolution for selection paths
//!
//! Turns a (possibly partial) [`SelectionPath`] into the set of taxon codes
//! reachable below it.

use crate::index::TreeIndex;
use crate::path::SelectionPath;
use std::collections::BTreeSet;

/// Deduplicated, sorted set of taxon codes
pub type CodeSet = BTreeSet<String>;

/// How a code set was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Collected from leaf values in the tree
    Structural,
    /// Nothing was collected; the last selected name is used as a literal code
    LiteralFallback,
}

/// Result of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Codes to filter the roster by
    pub codes: CodeSet,
    /// Whether the codes came from the tree or from the fallback
    pub kind: ResolutionKind,
}

impl Resolution {
    /// Check if the literal fallback was applied
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.kind == ResolutionKind::LiteralFallback
    }
}

/// Resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Path does not exist; callers show an empty result
    #[error("no taxonomy node at {path}")]
    PathNotFound {
        /// The path that was looked up
        path: SelectionPath,
    },
}

/// Resolves selection paths against a [`TreeIndex`]
#[derive(Debug, Clone, Copy)]
pub struct CodeResolver<'a> {
    index: &'a TreeIndex,
}

impl<'a> CodeResolver<'a> {
    /// Create resolver over an index
    #[inline]
    #[must_use]
    pub fn new(index: &'a TreeIndex) -> Self {
        Self { index }
    }

    /// Resolve `path` to the codes of its node and every descendant
    ///
    /// - empty path: every code in the tree
    /// - a node with its own leaf and descendants contributes both
    /// - when no code is found below an existing node, the last path segment
    ///   itself is used as the code ([`ResolutionKind::LiteralFallback`])
    ///
    /// # Errors
    /// Returns [`ResolveError::PathNotFound`] if the path does not exist.
    pub fn resolve(&self, path: &SelectionPath) -> Result<Resolution, ResolveError> {
        let codes = self
            .index
            .subtree_codes(path)
            .ok_or_else(|| ResolveError::PathNotFound { path: path.clone() })?;

        if !codes.is_empty() {
            tracing::debug!(%path, codes = codes.len(), "Resolved taxonomy codes");
            return Ok(Resolution {
                codes,
                kind: ResolutionKind::Structural,
            });
        }

        match path.last() {
            Some(name) => {
                tracing::warn!(%path, "No codes below selection, matching the name as a literal code");
                Ok(Resolution {
                    codes: CodeSet::from([name.to_string()]),
                    kind: ResolutionKind::LiteralFallback,
                })
            }
            None => Ok(Resolution {
                codes,
                kind: ResolutionKind::Structural,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{LeafValue, TaxonomyNode};
    use proptest::prelude::*;

    fn leaf(code: &str) -> TaxonomyNode {
        TaxonomyNode::leaf(LeafValue::new(code))
    }

    fn path(segments: &[&str]) -> SelectionPath {
        SelectionPath::new(segments.iter().copied()).unwrap()
    }

    fn codes(items: &[&str]) -> CodeSet {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn scenario_tree() -> TaxonomyNode {
        TaxonomyNode::new().with_child(
            "A",
            TaxonomyNode::new()
                .with_child("X", leaf("1"))
                .with_child("Y", leaf("2")),
        )
    }

    #[test]
    fn group_resolves_to_descendant_codes() {
        let index = TreeIndex::build(&scenario_tree());
        let resolver = CodeResolver::new(&index);

        let resolution = resolver.resolve(&path(&["A"])).unwrap();
        assert_eq!(resolution.codes, codes(&["1", "2"]));
        assert_eq!(resolution.kind, ResolutionKind::Structural);

        let resolution = resolver.resolve(&path(&["A", "X"])).unwrap();
        assert_eq!(resolution.codes, codes(&["1"]));
    }

    #[test]
    fn unknown_child_is_path_not_found() {
        let index = TreeIndex::build(&scenario_tree());
        let err = CodeResolver::new(&index).resolve(&path(&["A", "Z"])).unwrap_err();
        assert_eq!(err, ResolveError::PathNotFound { path: path(&["A", "Z"]) });
    }

    #[test]
    fn repeated_codes_collapse() {
        let tree = TaxonomyNode::new().with_child(
            "A",
            TaxonomyNode::new()
                .with_child("X", leaf("1"))
                .with_child("Y", TaxonomyNode::new().with_child("S", leaf("1"))),
        );
        let index = TreeIndex::build(&tree);

        let resolution = CodeResolver::new(&index).resolve(&path(&["A"])).unwrap();
        assert_eq!(resolution.codes, codes(&["1"]));
    }

    #[test]
    fn own_leaf_and_descendants_both_count() {
        let tree = TaxonomyNode::new().with_child(
            "A",
            TaxonomyNode::new().with_child(
                "X",
                TaxonomyNode::leaf(LeafValue::new("10")).with_child("S", leaf("11")),
            ),
        );
        let index = TreeIndex::build(&tree);

        let resolution = CodeResolver::new(&index).resolve(&path(&["A", "X"])).unwrap();
        assert_eq!(resolution.codes, codes(&["10", "11"]));
    }

    #[test]
    fn nodes_below_specialization_stay_addressable() {
        let tree = TaxonomyNode::new().with_child(
            "A",
            TaxonomyNode::new().with_child(
                "X",
                TaxonomyNode::new().with_child("S", TaxonomyNode::new().with_child("T", leaf("7"))),
            ),
        );
        let index = TreeIndex::build(&tree);
        let resolver = CodeResolver::new(&index);
        let deep = path(&["A", "X", "S", "T"]);

        assert_eq!(resolver.resolve(&deep).unwrap().codes, codes(&["7"]));
        assert_eq!(resolver.resolve(&path(&["A", "X", "S"])).unwrap().codes, codes(&["7"]));
        assert_eq!(index.paths_for_code("7"), [deep]);
    }

    #[test]
    fn empty_subtree_falls_back_to_selected_name() {
        let tree = TaxonomyNode::new()
            .with_child("Empty Group", TaxonomyNode::new())
            .with_child("A", TaxonomyNode::new().with_child("Blank", leaf("")));
        let index = TreeIndex::build(&tree);
        let resolver = CodeResolver::new(&index);

        let resolution = resolver.resolve(&path(&["Empty Group"])).unwrap();
        assert!(resolution.is_fallback());
        assert_eq!(resolution.codes, codes(&["Empty Group"]));

        let resolution = resolver.resolve(&path(&["A", "Blank"])).unwrap();
        assert!(resolution.is_fallback());
        assert_eq!(resolution.codes, codes(&["Blank"]));
    }

    #[test]
    fn empty_tree_root_resolves_to_nothing() {
        let index = TreeIndex::build(&TaxonomyNode::new());
        let resolution = CodeResolver::new(&index).resolve(&SelectionPath::root()).unwrap();
        assert!(resolution.codes.is_empty());
        assert!(!resolution.is_fallback());
    }

    /// Random three-level trees with small name and code alphabets so that
    /// duplicate codes across branches are common.
    fn arb_tree() -> impl Strategy<Value = TaxonomyNode> {
        let name = prop_oneof![Just("a"), Just("b"), Just("c")];
        let code = prop_oneof![Just("1"), Just("2"), Just("3"), Just("4")];
        let specialization = proptest::collection::vec((name.clone(), code.clone()), 0..3);
        let class = proptest::collection::vec((name.clone(), proptest::option::of(code), specialization), 0..3);
        let group = proptest::collection::vec((name, class), 1..4);

        group.prop_map(|groups| {
            let mut root = TaxonomyNode::new();
            for (g, classes) in groups {
                let mut group_node = TaxonomyNode::new();
                for (c, own, specs) in classes {
                    let mut class_node = TaxonomyNode::new();
                    class_node.set_leaf(own.map(LeafValue::new));
                    for (s, code) in specs {
                        class_node.insert_child(s, leaf(code));
                    }
                    group_node.insert_child(c, class_node);
                }
                root.insert_child(g, group_node);
            }
            root
        })
    }

    proptest! {
        #[test]
        fn prop_root_resolves_to_all_flattened_codes(tree in arb_tree()) {
            let index = TreeIndex::build(&tree);
            let resolution = CodeResolver::new(&index).resolve(&SelectionPath::root()).unwrap();
            let flattened: CodeSet = index.flattened().iter().map(|r| r.code.clone()).collect();
            prop_assert_eq!(resolution.codes, flattened);
        }

        #[test]
        fn prop_interior_node_is_union_of_children(tree in arb_tree()) {
            let index = TreeIndex::build(&tree);
            let resolver = CodeResolver::new(&index);

            let groups: Vec<_> = index.groups().into_iter().map(|g| SelectionPath::root().child(g)).collect();
            let classifications: Vec<_> = groups
                .iter()
                .flat_map(|g| index.children(g).into_iter().map(move |c| g.child(c)))
                .collect();

            for path in groups.iter().chain(&classifications) {
                let children = index.children(path);
                if children.is_empty() {
                    continue;
                }
                let parent = resolver.resolve(path).unwrap();
                if parent.is_fallback() {
                    continue;
                }

                let mut union: CodeSet = index.leaf(path).map(|leaf| leaf.code.clone()).into_iter().collect();
                for child in children {
                    let child_resolution = resolver.resolve(&path.child(child)).unwrap();
                    if !child_resolution.is_fallback() {
                        union.extend(child_resolution.codes);
                    }
                }
                prop_assert_eq!(parent.codes, union);
            }
        }
    }
}
