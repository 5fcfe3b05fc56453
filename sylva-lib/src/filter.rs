//! Search filtering.
//!
//! Filtering prunes every branch that contains no match while keeping the
//! ancestors of matches, so the result is still a tree rooted at the original
//! top-level nodes. The input is never mutated.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

use crate::model::TreeNode;

/// How labels are matched against the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Fuzzy match scored by nucleo-matcher (case-insensitive).
    Fuzzy,
}

/// Whether `query` filters anything (non-empty after trimming).
pub fn is_active(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Filters `nodes` by case-insensitive substring match on labels.
///
/// An empty or whitespace-only query returns the tree unchanged.
///
/// ```
/// use sylva_lib::TreeNode;
/// use sylva_lib::filter::filter;
///
/// let tree = vec![TreeNode::new("A", "A")
///     .child(TreeNode::new("B", "B"))
///     .child(TreeNode::new("C", "C"))];
/// let out = filter(&tree, "b");
/// assert_eq!(out[0].children.len(), 1);
/// assert_eq!(out[0].children[0].id, "B");
/// ```
pub fn filter(nodes: &[TreeNode], query: &str) -> Vec<TreeNode> {
    filter_with(nodes, query, MatchMode::Substring)
}

/// Filters `nodes` using the given match mode.
pub fn filter_with(nodes: &[TreeNode], query: &str, mode: MatchMode) -> Vec<TreeNode> {
    let query = query.trim();
    if query.is_empty() {
        return nodes.to_vec();
    }

    match mode {
        MatchMode::Substring => {
            let needle = query.to_lowercase();
            prune(nodes, &mut |label| label.to_lowercase().contains(&needle))
        }
        MatchMode::Fuzzy => {
            let mut matcher = Matcher::new(Config::DEFAULT);
            let pattern = Pattern::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            );
            let mut buf = Vec::new();
            prune(nodes, &mut |label| {
                let haystack = Utf32Str::new(label, &mut buf);
                pattern.score(haystack, &mut matcher).is_some()
            })
        }
    }
}

/// Keeps nodes whose label matches or that have a surviving descendant.
fn prune(nodes: &[TreeNode], matches: &mut impl FnMut(&str) -> bool) -> Vec<TreeNode> {
    nodes
        .iter()
        .filter_map(|node| {
            let children = prune(&node.children, matches);
            if matches(&node.label) || !children.is_empty() {
                Some(TreeNode {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    color: node.color.clone(),
                    children,
                })
            } else {
                None
            }
        })
        .collect()
}
