//! Taxonomy JSON loader
//!
//! The document is a nested object keyed by Group, Classification and
//! Specialization names. A node's leaf value sits under the reserved key
//! `"value"`:
//!
//! ```json
//! { "Allopathic & Osteopathic Physicians": {
//!     "Surgery": { "value": { "nucc_code": "208600000X", "nucc_definition": "..." } } } }
//! ```
//!
//! Bad subtrees are skipped with a warning and reported back; they never
//! fail the load.

use crate::error::{IngestError, Result};
use golem_taxonomy::{LeafValue, MalformedTreeError, TaxonomyNode};
use serde_json::{Map, Value};
use std::path::Path;

/// Reserved key holding a node's leaf value
pub const LEAF_KEY: &str = "value";
/// Leaf field holding the taxon code
pub const CODE_KEY: &str = "nucc_code";
/// Leaf field holding the definition
pub const DEFINITION_KEY: &str = "nucc_definition";

/// Parsed taxonomy plus the subtrees that were skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedTree {
    /// Root node
    pub root: TaxonomyNode,
    /// Skipped subtrees, in document order
    pub skipped: Vec<MalformedTreeError>,
}

/// Parse a taxonomy document
///
/// # Errors
/// Returns [`IngestError::Json`] on invalid JSON and
/// [`IngestError::NotAnObject`] when the root is not an object.
pub fn parse_tree(content: &str) -> Result<LoadedTree> {
    let value: Value = serde_json::from_str(content)?;
    tree_from_value(&value)
}

/// Read and parse a taxonomy file
///
/// # Errors
/// Returns [`IngestError::Io`] if the file cannot be read, otherwise as
/// [`parse_tree`].
pub fn load_tree(path: impl AsRef<Path>) -> Result<LoadedTree> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::io_error(path, e))?;
    let loaded = parse_tree(&content)?;
    tracing::info!(
        "Taxonomy {} loaded ({} groups, {} skipped)",
        path.display(),
        loaded.root.child_count(),
        loaded.skipped.len()
    );
    Ok(loaded)
}

/// Convert an already parsed document
///
/// # Errors
/// Returns [`IngestError::NotAnObject`] when the root is not an object.
pub fn tree_from_value(value: &Value) -> Result<LoadedTree> {
    let Value::Object(map) = value else {
        return Err(IngestError::NotAnObject(kind(value)));
    };

    let mut skipped = Vec::new();
    let root = convert(map, &mut Vec::new(), &mut skipped);
    Ok(LoadedTree { root, skipped })
}

fn convert(
    map: &Map<String, Value>,
    path: &mut Vec<String>,
    skipped: &mut Vec<MalformedTreeError>,
) -> TaxonomyNode {
    let mut node = TaxonomyNode::new();

    for (key, value) in map {
        if key == LEAF_KEY {
            match leaf(value) {
                Ok(leaf) => node.set_leaf(Some(leaf)),
                Err(reason) => skip(path, key, reason, skipped),
            }
            continue;
        }

        if key.trim().is_empty() {
            skip(path, key, "empty name".into(), skipped);
            continue;
        }

        match value {
            Value::Object(children) => {
                path.push(key.clone());
                let child = convert(children, path, skipped);
                path.pop();
                node.insert_child(key.clone(), child);
            }
            other => skip(path, key, format!("expected an object, found {}", kind(other)), skipped),
        }
    }

    node
}

fn leaf(value: &Value) -> std::result::Result<LeafValue, String> {
    let Value::Object(fields) = value else {
        return Err(format!("leaf value must be an object, found {}", kind(value)));
    };

    let code = match fields.get(CODE_KEY) {
        Some(Value::String(code)) => code.trim().to_string(),
        Some(Value::Number(code)) => code.to_string(),
        Some(other) => return Err(format!("{CODE_KEY} must be a string, found {}", kind(other))),
        None => return Err(format!("leaf value has no {CODE_KEY}")),
    };
    if code.is_empty() {
        return Err(format!("leaf value has a blank {CODE_KEY}"));
    }

    let definition = fields
        .get(DEFINITION_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(LeafValue::new(code).with_definition(definition))
}

fn skip(path: &[String], key: &str, reason: String, skipped: &mut Vec<MalformedTreeError>) {
    let mut path = path.to_vec();
    path.push(key.to_string());
    tracing::warn!("Skipping taxonomy node {:?}: {}", path, reason);
    skipped.push(MalformedTreeError::new(path, reason));
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golem_taxonomy::SelectionPath;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const DOC: &str = r#"{
        "A": {
            "X": { "value": { "nucc_code": "1", "nucc_definition": "Ex" } },
            "Y": { "value": { "nucc_code": "2" } }
        },
        "B": {
            "value": { "nucc_code": "3" },
            "Z": { "value": { "nucc_code": "4" } }
        }
    }"#;

    fn path(names: &[&str]) -> SelectionPath {
        SelectionPath::new(names.iter().copied()).unwrap()
    }

    #[test]
    fn parses_leaves_and_children() {
        let loaded = parse_tree(DOC).unwrap();
        assert!(loaded.skipped.is_empty());

        let x = loaded.root.descend(&path(&["A", "X"])).unwrap();
        assert_eq!(x.leaf_value(), Some(&LeafValue::new("1").with_definition("Ex")));

        let b = loaded.root.descend(&path(&["B"])).unwrap();
        assert_eq!(b.leaf_value().map(|v| v.code.as_str()), Some("3"));
        assert_eq!(b.child_count(), 1);
    }

    #[test]
    fn keeps_document_order() {
        let loaded = parse_tree(r#"{"Zeta": {}, "Alpha": {}}"#).unwrap();
        let names: Vec<_> = loaded.root.children().map(|(name, _)| name).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }

    #[test]
    fn skips_malformed_subtrees() {
        let loaded = parse_tree(
            r#"{
                "A": {
                    "Bad": 7,
                    "NoCode": { "value": { "nucc_definition": "d" } },
                    "": {},
                    "Ok": { "value": { "nucc_code": "1" } }
                }
            }"#,
        )
        .unwrap();

        let reasons: Vec<_> = loaded.skipped.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                vec!["A".to_string(), "Bad".to_string()],
                vec!["A".to_string(), "NoCode".to_string(), "value".to_string()],
                vec!["A".to_string(), String::new()],
            ]
        );

        let a = loaded.root.descend(&path(&["A"])).unwrap();
        let names: Vec<_> = a.children().map(|(name, _)| name).collect();
        assert_eq!(names, ["NoCode", "Ok"]);
        assert!(a.child("NoCode").unwrap().leaf_value().is_none());
    }

    #[test]
    fn numeric_codes_become_text() {
        let loaded = parse_tree(r#"{"A": {"value": {"nucc_code": 101}}}"#).unwrap();
        let a = loaded.root.child("A").unwrap();
        assert_eq!(a.leaf_value().map(|v| v.code.as_str()), Some("101"));
    }

    #[test]
    fn root_must_be_object() {
        assert!(matches!(parse_tree("[1, 2]"), Err(IngestError::NotAnObject("an array"))));
        assert!(matches!(parse_tree("{"), Err(IngestError::Json(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let loaded = load_tree(file.path()).unwrap();
        assert_eq!(loaded.root.child_count(), 2);

        let missing = load_tree(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(IngestError::Io { .. })));
    }
}
