//! Load-time validation.

use std::collections::HashSet;

use log::warn;

use crate::error::TreeError;

use super::TreeNode;

/// Checks that every id in the tree is non-empty and unique.
pub fn validate(nodes: &[TreeNode]) -> Result<(), TreeError> {
    let mut seen = HashSet::new();
    check_ids(nodes, &mut seen)
}

/// Validates `node` against the ids already present in `existing`.
pub(crate) fn validate_insert(existing: &[TreeNode], node: &TreeNode) -> Result<(), TreeError> {
    let mut seen = HashSet::new();
    check_ids(existing, &mut seen)?;
    check_ids(std::slice::from_ref(node), &mut seen)
}

fn check_ids<'a>(nodes: &'a [TreeNode], seen: &mut HashSet<&'a str>) -> Result<(), TreeError> {
    for node in nodes {
        if node.id.is_empty() {
            warn!("Rejecting node '{}' with empty id", node.label);
            return Err(TreeError::EmptyId {
                label: node.label.clone(),
            });
        }
        if !seen.insert(node.id.as_str()) {
            warn!("Rejecting tree with duplicate id '{}'", node.id);
            return Err(TreeError::DuplicateId {
                id: node.id.clone(),
            });
        }
        check_ids(&node.children, seen)?;
    }
    Ok(())
}

/// Parses a JSON array of nodes and validates it.
///
/// ```
/// let json = r#"[{"id": "1", "label": "a", "children": [{"id": "2", "label": "b"}]}]"#;
/// let tree = sylva_lib::model::from_json(json).unwrap();
/// assert_eq!(tree[0].children[0].label, "b");
/// ```
pub fn from_json(json: &str) -> Result<Vec<TreeNode>, TreeError> {
    let nodes: Vec<TreeNode> = serde_json::from_str(json)?;
    validate(&nodes)?;
    Ok(nodes)
}
