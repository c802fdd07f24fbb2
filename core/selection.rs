use crate::source::ContentRef;
use crate::tree::{NodeKind, TreeNode};
use std::collections::BTreeMap;

/// Checkbox state of a tree row, as queried by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    /// Some, but not all, File descendants are selected. Files are never
    /// partial.
    Partial,
    Checked,
}

/// The currently selected files: a mapping from File-node path to that
/// node's content reference. Directory paths are never stored. Keys iterate
/// in ascending lexicographic order.
///
/// Holders must clear or rebuild this set whenever a new tree is built;
/// every key is expected to name a File node of the active tree snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    files: BTreeMap<String, ContentRef>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file(&mut self, path: impl Into<String>, content: ContentRef) {
        self.files.insert(path.into(), content);
    }

    pub fn unset_file(&mut self, path: &str) -> bool {
        self.files.remove(path).is_some()
    }

    pub fn is_file_selected(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Recursively selects or deselects every File descendant of `node`,
    /// the node itself included when it is a File.
    pub fn toggle_subtree(&mut self, node: &TreeNode, checked: bool) {
        if node.kind == NodeKind::File {
            if let Some(content) = node.content_ref() {
                if checked {
                    self.set_file(node.path.clone(), content.clone());
                } else {
                    self.unset_file(&node.path);
                }
            }
            return;
        }
        for child in &node.children {
            self.toggle_subtree(child, checked);
        }
    }

    /// Clears the set, then selects every File node of the tree.
    pub fn select_all(&mut self, tree: &TreeNode) {
        self.clear();
        self.toggle_subtree(tree, true);
        log::debug!("Selected all: {} files", self.len());
    }

    /// True iff the directory has at least one File descendant and every one
    /// of them is selected. Directories with no File descendants anywhere
    /// below them never count as fully selected.
    pub fn is_directory_fully_selected(&self, node: &TreeNode) -> bool {
        let mut any = false;
        let mut all = true;
        node.for_each_file(&mut |file| {
            any = true;
            all &= self.is_file_selected(&file.path);
        });
        any && all
    }

    pub fn check_state(&self, node: &TreeNode) -> CheckState {
        if node.kind == NodeKind::File {
            return if self.is_file_selected(&node.path) {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            };
        }
        let mut selected = 0usize;
        let mut total = 0usize;
        node.for_each_file(&mut |file| {
            total += 1;
            if self.is_file_selected(&file.path) {
                selected += 1;
            }
        });
        if total == 0 || selected == 0 {
            CheckState::Unchecked
        } else if selected == total {
            CheckState::Checked
        } else {
            CheckState::Partial
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Selected entries in ascending path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentRef)> {
        self.files.iter().map(|(path, content)| (path.as_str(), content))
    }

    /// Selected paths in ascending order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}
