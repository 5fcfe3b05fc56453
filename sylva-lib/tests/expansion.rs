use std::collections::HashSet;

use sylva_lib::expansion::{ExpansionState, SearchPhase};
use sylva_lib::filter::filter;
use sylva_lib::TreeNode;

fn tree() -> Vec<TreeNode> {
    vec![
        TreeNode::new("docs", "docs").child(TreeNode::new("readme", "readme.md")),
        TreeNode::new("src", "src")
            .child(
                TreeNode::new("widgets", "widgets")
                    .child(TreeNode::new("tree", "tree.rs"))
                    .child(TreeNode::new("list", "list.rs")),
            )
            .child(TreeNode::new("main", "main.rs")),
    ]
}

fn set(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn search(state: &mut ExpansionState, data: &[TreeNode], query: &str) {
    let filtered = filter(data, query);
    state.sync_search(query, &filtered);
}

#[test]
fn test_toggle_flips_single_id() {
    let mut state = ExpansionState::new();
    state.toggle("src");
    assert!(state.is_expanded("src"));
    state.toggle("widgets");
    state.toggle("src");
    assert!(!state.is_expanded("src"));
    // Descendant keeps its own state
    assert!(state.is_expanded("widgets"));
}

#[test]
fn test_search_forces_filtered_branches_open() {
    let data = tree();
    let mut state = ExpansionState::new();
    search(&mut state, &data, "tree");
    assert_eq!(state.phase(), SearchPhase::SearchActive);
    assert_eq!(state.expanded(), &set(&["src", "widgets"]));
}

#[test]
fn test_search_restore() {
    let data = tree();
    let mut state = ExpansionState::with_expanded(["docs".to_string()]);
    let before = state.expanded().clone();

    search(&mut state, &data, "list");
    assert_ne!(state.expanded(), &before);
    search(&mut state, &data, "");

    assert_eq!(state.phase(), SearchPhase::Normal);
    assert_eq!(state.expanded(), &before);
    assert!(state.snapshot().is_none());
}

#[test]
fn test_query_change_keeps_original_snapshot() {
    let data = tree();
    let mut state = ExpansionState::with_expanded(["docs".to_string()]);

    search(&mut state, &data, "r");
    search(&mut state, &data, "re");
    search(&mut state, &data, "readme");
    assert_eq!(state.expanded(), &set(&["docs"]));
    assert_eq!(state.snapshot(), Some(&set(&["docs"])));

    search(&mut state, &data, "   ");
    assert_eq!(state.expanded(), &set(&["docs"]));
}

#[test]
fn test_toggles_during_search_are_discarded() {
    let data = tree();
    let mut state = ExpansionState::with_expanded(["src".to_string()]);

    search(&mut state, &data, ".rs");
    state.toggle("widgets");
    state.toggle("docs");
    assert!(!state.is_expanded("widgets"));

    search(&mut state, &data, "");
    assert_eq!(state.expanded(), &set(&["src"]));
}

#[test]
fn test_empty_query_without_search_is_noop() {
    let data = tree();
    let mut state = ExpansionState::with_expanded(["src".to_string()]);
    search(&mut state, &data, "");
    assert_eq!(state.expanded(), &set(&["src"]));
    assert!(!state.is_searching());
}

#[test]
fn test_expand_collapse_all() {
    let data = tree();
    let mut state = ExpansionState::new();
    state.expand_all(&data);
    assert_eq!(state.expanded(), &set(&["docs", "src", "widgets"]));
    assert_eq!(state, ExpansionState::all_expanded(&data));
    state.collapse_all();
    assert!(state.expanded().is_empty());
}

#[test]
fn test_expand_and_collapse_report_changes() {
    let mut state = ExpansionState::new();
    assert!(state.expand("docs"));
    assert!(!state.expand("docs"));
    assert!(state.is_expanded("docs"));
    assert!(state.collapse("docs"));
    assert!(!state.collapse("docs"));
    assert!(!state.is_expanded("docs"));
}

#[test]
fn test_expand_new_reaches_snapshot_during_search() {
    let data = tree();
    let mut state = ExpansionState::with_expanded(["docs".to_string()]);
    search(&mut state, &data, "tree");
    state.expand_new(&["widgets".to_string()]);
    assert_eq!(state.snapshot(), Some(&set(&["docs", "widgets"])));

    search(&mut state, &data, "");
    assert_eq!(state.expanded(), &set(&["docs", "widgets"]));
}

#[test]
fn test_retain_existing_prunes_live_and_snapshot() {
    let data = tree();
    let mut state = ExpansionState::with_expanded(["docs".to_string(), "gone".to_string()]);
    search(&mut state, &data, "tree");
    state.retain_existing(&data);
    assert_eq!(state.snapshot(), Some(&set(&["docs"])));
}
