use crate::tree::{NodeKind, TreeNode};

/// Renders a tree as an indented listing with box-drawing connectors, root
/// first, depth-first, in builder sort order. Pure function.
pub fn tree_to_text(root: &TreeNode) -> String {
    let mut lines = Vec::new();
    render_node(root, "", true, &mut lines);
    lines.join("\n")
}

fn render_node(node: &TreeNode, prefix: &str, is_last: bool, lines: &mut Vec<String>) {
    let icon = match node.kind {
        NodeKind::Directory => "📁",
        NodeKind::File => "📄",
    };
    let connector = if prefix.is_empty() {
        ""
    } else if is_last {
        "└─ "
    } else {
        "├─ "
    };
    lines.push(format!("{prefix}{connector}{icon} {}", node.name));

    if !node.children.is_empty() {
        let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
        let last_index = node.children.len() - 1;
        for (index, child) in node.children.iter().enumerate() {
            render_node(child, &child_prefix, index == last_index, lines);
        }
    }
}
