//! Built-in trees for running without a data file.

use sylva_lib::TreeNode;

/// The small demo tree.
pub fn demo() -> Vec<TreeNode> {
    vec![
        TreeNode::new("1", "Cloud_Infrastructure_Control_System_v2026.config"),
        TreeNode::new("2", "Development_Source")
            .child(TreeNode::new("2-1", "Main_Module.ts").with_color("#4caf50"))
            .child(TreeNode::new("2-2", "Styles_Def.css").with_color("#9c27b0")),
        TreeNode::new("3", "README_LEGAL_LICENSE.md"),
    ]
}

const PALETTE: [&str; 4] = ["#4caf50", "#9c27b0", "#ff9800", "#03a9f4"];

/// A generated tree of `groups` folders, each holding `per_group` modules
/// with `per_module` files, for exercising the virtual renderer.
pub fn large(groups: usize, per_group: usize, per_module: usize) -> Vec<TreeNode> {
    (0..groups)
        .map(|g| {
            let modules = (0..per_group)
                .map(|m| {
                    let files = (0..per_module)
                        .map(|f| {
                            TreeNode::new(format!("{g}-{m}-{f}"), format!("file_{g}_{m}_{f}.rs"))
                                .with_color(PALETTE[(g + m + f) % PALETTE.len()])
                        })
                        .collect();
                    TreeNode::new(format!("{g}-{m}"), format!("module_{g}_{m}")).with_children(files)
                })
                .collect();
            TreeNode::new(format!("{g}"), format!("group_{g}")).with_children(modules)
        })
        .collect()
}
