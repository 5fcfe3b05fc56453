use std::collections::HashSet;

use sylva_lib::TreeNode;
use sylva_lib::filter::{MatchMode, filter, filter_with, is_active};

fn sample() -> Vec<TreeNode> {
    vec![
        TreeNode::new("1", "Cloud_Infrastructure_Control_System_v2026.config"),
        TreeNode::new("2", "Development_Source")
            .child(TreeNode::new("2-1", "Main_Module.ts").with_color("#4caf50"))
            .child(TreeNode::new("2-2", "Styles_Def.css").with_color("#9c27b0")),
        TreeNode::new("3", "README_LEGAL_LICENSE.md"),
    ]
}

fn ids(nodes: &[TreeNode]) -> Vec<String> {
    let mut out = Vec::new();
    for node in nodes {
        node.walk(&mut |n| out.push(n.id.clone()));
    }
    out
}

#[test]
fn test_empty_query_returns_tree_unchanged() {
    let tree = sample();
    assert_eq!(filter(&tree, ""), tree);
    assert_eq!(filter(&tree, "   \t"), tree);
}

#[test]
fn test_is_active() {
    assert!(!is_active(""));
    assert!(!is_active("  "));
    assert!(is_active(" x "));
}

#[test]
fn test_ancestor_kept_sibling_pruned() {
    let tree = vec![
        TreeNode::new("A", "A")
            .child(TreeNode::new("B", "B"))
            .child(TreeNode::new("C", "C")),
    ];
    let out = filter(&tree, "B");
    let expected = vec![TreeNode::new("A", "A").child(TreeNode::new("B", "B"))];
    assert_eq!(out, expected);
}

#[test]
fn test_case_insensitive_and_trimmed() {
    let out = filter(&sample(), "  main_MODULE ");
    assert_eq!(ids(&out), ["2", "2-1"]);
}

#[test]
fn test_branch_match_drops_non_matching_children() {
    let out = filter(&sample(), "development");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "2");
    assert!(out[0].children.is_empty());
}

#[test]
fn test_order_preserved() {
    let out = filter(&sample(), "s");
    let top: Vec<&str> = out.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(top, ["1", "2", "3"]);
    let children: Vec<&str> = out[1].children.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(children, ["2-1", "2-2"]);
}

#[test]
fn test_no_match_returns_empty() {
    assert!(filter(&sample(), "zzz_nothing").is_empty());
}

#[test]
fn test_filter_never_introduces_nodes() {
    let tree = sample();
    let all: HashSet<String> = ids(&tree).into_iter().collect();
    for query in ["s", "ts", "md", "2026", "_", "x"] {
        for id in ids(&filter(&tree, query)) {
            assert!(all.contains(&id), "query {query:?} produced unknown id {id}");
        }
    }
}

#[test]
fn test_deep_match_keeps_every_ancestor() {
    let tree = vec![
        TreeNode::new("a", "alpha").child(
            TreeNode::new("b", "beta")
                .child(TreeNode::new("c", "gamma").child(TreeNode::new("d", "needle")))
                .child(TreeNode::new("e", "epsilon")),
        ),
    ];
    let out = filter(&tree, "needle");
    assert_eq!(ids(&out), ["a", "b", "c", "d"]);
}

#[test]
fn test_input_not_mutated() {
    let tree = sample();
    let before = tree.clone();
    let _ = filter(&tree, "main");
    assert_eq!(tree, before);
}

#[test]
fn test_fuzzy_mode() {
    let out = filter_with(&sample(), "mnmod", MatchMode::Fuzzy);
    assert_eq!(ids(&out), ["2", "2-1"]);

    let out = filter_with(&sample(), "", MatchMode::Fuzzy);
    assert_eq!(out, sample());
}
