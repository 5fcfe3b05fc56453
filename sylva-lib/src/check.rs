//! Tri-state checkbox engine.
//!
//! Only the checked-id set is stored. The state of a branch is always derived
//! from its leaves, so ids of branches that happen to be in the set do not
//! affect what is displayed.

use std::collections::{HashMap, HashSet};

use crate::model::TreeNode;

/// Displayed state of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckState {
    /// Nothing under the node is checked.
    Unchecked,
    /// Everything under the node is checked.
    Checked,
    /// Some but not all descendants are checked.
    Indeterminate,
}

impl CheckState {
    /// Combines child states into the state of their parent.
    ///
    /// Returns `Unchecked` for an empty iterator; callers handle leaves
    /// separately.
    fn combine(states: impl IntoIterator<Item = CheckState>) -> CheckState {
        let mut any_checked = false;
        let mut any_unchecked = false;
        for state in states {
            match state {
                CheckState::Checked => any_checked = true,
                CheckState::Unchecked => any_unchecked = true,
                CheckState::Indeterminate => return CheckState::Indeterminate,
            }
            if any_checked && any_unchecked {
                return CheckState::Indeterminate;
            }
        }
        if any_checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/// Computes the displayed state of `node`.
pub fn check_state(node: &TreeNode, checked: &HashSet<String>) -> CheckState {
    if node.is_leaf() {
        return if checked.contains(&node.id) {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        };
    }
    CheckState::combine(node.children.iter().map(|c| check_state(c, checked)))
}

/// Computes the state of every node in one post-order pass.
///
/// Equivalent to calling [`check_state`] on each node, without re-walking
/// subtrees.
pub fn check_states(nodes: &[TreeNode], checked: &HashSet<String>) -> HashMap<String, CheckState> {
    let mut out = HashMap::new();
    for node in nodes {
        collect_states(node, checked, &mut out);
    }
    out
}

fn collect_states(
    node: &TreeNode,
    checked: &HashSet<String>,
    out: &mut HashMap<String, CheckState>,
) -> CheckState {
    let state = if node.is_leaf() {
        if checked.contains(&node.id) {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    } else {
        let children: Vec<CheckState> = node
            .children
            .iter()
            .map(|c| collect_states(c, checked, out))
            .collect();
        CheckState::combine(children)
    };
    out.insert(node.id.clone(), state);
    state
}

/// Flips `node` and its whole subtree.
///
/// A fully checked node becomes unchecked; an unchecked or indeterminate one
/// becomes checked. Branch ids are added and removed along with leaf ids.
///
/// ```
/// use std::collections::HashSet;
/// use sylva_lib::TreeNode;
/// use sylva_lib::check::{check_state, toggle};
/// use sylva_lib::CheckState;
///
/// let p = TreeNode::new("P", "P")
///     .child(TreeNode::new("x", "x"))
///     .child(TreeNode::new("y", "y"));
/// let checked = HashSet::from(["x".to_string()]);
/// let next = toggle(&p, &checked);
/// assert_eq!(check_state(&p, &next), CheckState::Checked);
/// ```
pub fn toggle(node: &TreeNode, checked: &HashSet<String>) -> HashSet<String> {
    let target = check_state(node, checked) != CheckState::Checked;
    let mut next = checked.clone();
    node.walk(&mut |n| {
        if target {
            next.insert(n.id.clone());
        } else {
            next.remove(&n.id);
        }
    });
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine() {
        use CheckState::*;
        assert_eq!(CheckState::combine([Checked, Checked]), Checked);
        assert_eq!(CheckState::combine([Unchecked, Unchecked]), Unchecked);
        assert_eq!(CheckState::combine([Checked, Unchecked]), Indeterminate);
        assert_eq!(CheckState::combine([Checked, Indeterminate]), Indeterminate);
        assert_eq!(CheckState::combine([Indeterminate]), Indeterminate);
    }
}
