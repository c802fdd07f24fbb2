use crate::error::{AppError, Result};
use crate::ext::collect_extensions;
use crate::extract::extract_selected;
use crate::ignore_list::IgnoreSet;
use crate::render::tree_to_text;
use crate::selection::{CheckState, SelectionSet};
use crate::source::TreeSource;
use crate::tree::{TreeNode, build_tree};
use std::collections::BTreeSet;

/// One picking session over one chosen root: the source, the ignore set, the
/// current tree snapshot, and the selection. Replaces free-floating shared
/// state with a single owner; create a fresh session per chosen root.
///
/// Single-threaded by design. Mutations are plain map updates with no
/// internal locking; a multi-threaded caller must add its own
/// synchronization.
pub struct Session {
    source: Box<dyn TreeSource>,
    ignored: IgnoreSet,
    tree: Option<TreeNode>,
    selection: SelectionSet,
}

impl Session {
    pub fn new(source: Box<dyn TreeSource>, ignored: IgnoreSet) -> Self {
        Self {
            source,
            ignored,
            tree: None,
            selection: SelectionSet::new(),
        }
    }

    /// Builds a fresh tree snapshot from the source and the current ignore
    /// set. On success the new tree replaces the old one and the selection is
    /// cleared, so no stale paths survive. On failure the previous tree and
    /// selection are left untouched.
    pub fn rebuild(&mut self) -> Result<&TreeNode> {
        let tree = build_tree(self.source.as_ref(), &self.ignored)?;
        self.selection.clear();
        Ok(self.tree.insert(tree))
    }

    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    fn require_tree(&self) -> Result<&TreeNode> {
        self.tree
            .as_ref()
            .ok_or_else(|| AppError::InvalidArgument("No tree has been built yet".to_string()))
    }

    /// Applies a renderer toggle intent: a File selector sets or unsets that
    /// one file, a Directory selector toggles its entire subtree.
    pub fn toggle_path(&mut self, path: &str, checked: bool) -> Result<()> {
        let node = self
            .tree
            .as_ref()
            .ok_or_else(|| AppError::InvalidArgument("No tree has been built yet".to_string()))?
            .find(path)
            .ok_or_else(|| {
                AppError::InvalidArgument(format!("No such path in the current tree: '{path}'"))
            })?;
        log::trace!(
            "Toggling {} '{}' -> {}",
            node.kind.as_str(),
            node.path,
            checked
        );
        self.selection.toggle_subtree(node, checked);
        Ok(())
    }

    /// Clears the selection, then selects every file in the current tree.
    /// Returns the number of selected files.
    pub fn select_all(&mut self) -> Result<usize> {
        // Borrow the tree field directly so the selection stays mutable.
        let tree = self
            .tree
            .as_ref()
            .ok_or_else(|| AppError::InvalidArgument("No tree has been built yet".to_string()))?;
        self.selection.select_all(tree);
        Ok(self.selection.len())
    }

    pub fn check_state(&self, path: &str) -> Result<CheckState> {
        let node = self.require_tree()?.find(path).ok_or_else(|| {
            AppError::InvalidArgument(format!("No such path in the current tree: '{path}'"))
        })?;
        Ok(self.selection.check_state(node))
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selected_paths(&self) -> Vec<&str> {
        self.selection.paths().collect()
    }

    /// The delimited text document for the current selection.
    pub fn extract(&self) -> Result<String> {
        extract_selected(&self.selection)
    }

    /// The tree-as-text listing for the current tree.
    pub fn tree_text(&self) -> Result<String> {
        Ok(tree_to_text(self.require_tree()?))
    }

    /// Distinct extensions of the current tree's files, sorted.
    pub fn extensions(&self) -> Result<BTreeSet<String>> {
        Ok(collect_extensions(self.require_tree()?))
    }

    pub fn ignored(&self) -> &IgnoreSet {
        &self.ignored
    }

    /// Mutable ignore access for add/remove between rebuilds. Changing it
    /// only affects the next [`Session::rebuild`].
    pub fn ignored_mut(&mut self) -> &mut IgnoreSet {
        &mut self.ignored
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("root", &self.source.root_name())
            .field("ignored", &self.ignored)
            .field("files", &self.tree.as_ref().map(TreeNode::file_count))
            .field("selected", &self.selection.len())
            .finish()
    }
}
