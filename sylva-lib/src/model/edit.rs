//! Structural edits.
//!
//! All edits take the current tree by reference and return a new one; the
//! input is never touched.

use crate::error::TreeError;

use super::TreeNode;

/// Returns a copy of the tree with the label of `id` replaced.
///
/// Ids that are not present leave the copy identical to the input.
pub fn rename(nodes: &[TreeNode], id: &str, label: &str) -> Vec<TreeNode> {
    nodes
        .iter()
        .map(|node| {
            if node.id == id {
                TreeNode {
                    label: label.to_string(),
                    ..node.clone()
                }
            } else {
                TreeNode {
                    children: rename(&node.children, id, label),
                    ..node.clone()
                }
            }
        })
        .collect()
}

/// Removes the node with `id` (and its subtree) at any depth.
///
/// Returns the new tree and the removed node, or `None` when nothing matched.
pub fn remove(nodes: &[TreeNode], id: &str) -> (Vec<TreeNode>, Option<TreeNode>) {
    let mut removed = None;
    let tree = remove_inner(nodes, id, &mut removed);
    (tree, removed)
}

fn remove_inner(nodes: &[TreeNode], id: &str, removed: &mut Option<TreeNode>) -> Vec<TreeNode> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        if removed.is_none() && node.id == id {
            *removed = Some(node.clone());
            continue;
        }
        if removed.is_none() && node.is_branch() {
            out.push(TreeNode {
                children: remove_inner(&node.children, id, removed),
                ..node.clone()
            });
        } else {
            out.push(node.clone());
        }
    }
    out
}

/// Appends `node` as the last child of `parent`, or at top level when
/// `parent` is `None`.
///
/// Fails if any id in `node` already exists or if `parent` is unknown.
pub fn insert(
    nodes: &[TreeNode],
    parent: Option<&str>,
    node: TreeNode,
) -> Result<Vec<TreeNode>, TreeError> {
    super::validate_insert(nodes, &node)?;

    let Some(parent) = parent else {
        let mut out = nodes.to_vec();
        out.push(node);
        return Ok(out);
    };

    if super::find(nodes, parent).is_none() {
        return Err(TreeError::UnknownParent {
            id: parent.to_string(),
        });
    }

    Ok(append_under(nodes, parent, &node))
}

fn append_under(nodes: &[TreeNode], parent: &str, node: &TreeNode) -> Vec<TreeNode> {
    nodes
        .iter()
        .map(|n| {
            let mut children = append_under(&n.children, parent, node);
            if n.id == parent {
                children.push(node.clone());
            }
            TreeNode {
                children,
                ..n.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TreeNode> {
        vec![
            TreeNode::new("1", "root file"),
            TreeNode::new("2", "src")
                .child(TreeNode::new("2-1", "main.rs"))
                .child(TreeNode::new("2-2", "lib.rs").with_color("#9c27b0")),
        ]
    }

    #[test]
    fn test_rename_nested() {
        let tree = sample();
        let renamed = rename(&tree, "2-2", "mod.rs");
        assert_eq!(renamed[1].children[1].label, "mod.rs");
        assert_eq!(renamed[1].children[1].color.as_deref(), Some("#9c27b0"));
        // Input untouched
        assert_eq!(tree[1].children[1].label, "lib.rs");
    }

    #[test]
    fn test_rename_unknown_id_is_identity() {
        let tree = sample();
        assert_eq!(rename(&tree, "nope", "x"), tree);
    }

    #[test]
    fn test_remove_top_level() {
        let (tree, removed) = remove(&sample(), "1");
        assert_eq!(tree.len(), 1);
        assert_eq!(removed.map(|n| n.id), Some("1".to_string()));
    }

    #[test]
    fn test_remove_nested() {
        let (tree, removed) = remove(&sample(), "2-1");
        assert_eq!(tree[1].children.len(), 1);
        assert_eq!(tree[1].children[0].id, "2-2");
        assert!(removed.is_some());
    }

    #[test]
    fn test_remove_branch_drops_subtree() {
        let (tree, removed) = remove(&sample(), "2");
        assert_eq!(tree.len(), 1);
        assert_eq!(removed.map(|n| n.children.len()), Some(2));
    }

    #[test]
    fn test_remove_unknown() {
        let (tree, removed) = remove(&sample(), "zzz");
        assert_eq!(tree, sample());
        assert!(removed.is_none());
    }

    #[test]
    fn test_insert_top_level_and_nested() {
        let tree = insert(&sample(), None, TreeNode::new("3", "README.md")).unwrap();
        assert_eq!(tree.last().map(|n| n.id.as_str()), Some("3"));

        let tree = insert(&tree, Some("2"), TreeNode::new("2-3", "util.rs")).unwrap();
        assert_eq!(tree[1].children.len(), 3);
        assert_eq!(tree[1].children[2].id, "2-3");
    }

    #[test]
    fn test_insert_under_leaf_makes_it_a_branch() {
        let tree = insert(&sample(), Some("1"), TreeNode::new("1-1", "child")).unwrap();
        assert!(tree[0].is_branch());
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let err = insert(&sample(), None, TreeNode::new("2-1", "dup")).unwrap_err();
        assert!(matches!(err, TreeError::DuplicateId { ref id } if id == "2-1"));
    }

    #[test]
    fn test_insert_rejects_unknown_parent() {
        let err = insert(&sample(), Some("9"), TreeNode::new("9-1", "x")).unwrap_err();
        assert!(matches!(err, TreeError::UnknownParent { .. }));
    }
}
