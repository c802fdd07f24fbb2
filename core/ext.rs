use crate::tree::{NodeKind, TreeNode};
use std::collections::BTreeSet;

/// Derives the lowercased extension of a file name, leading dot included.
/// Names with no dot, or whose only dot starts the name (".gitignore"),
/// have no extension and yield an empty string.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

/// Collects the distinct extensions of every File node in the tree, sorted.
pub fn collect_extensions(tree: &TreeNode) -> BTreeSet<String> {
    let mut extensions = BTreeSet::new();
    walk(tree, &mut extensions);
    extensions
}

fn walk(node: &TreeNode, extensions: &mut BTreeSet<String>) {
    if node.kind == NodeKind::File {
        extensions.insert(extension_of(&node.name));
    }
    for child in &node.children {
        walk(child, extensions);
    }
}
