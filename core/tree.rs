use crate::error::Result;
use crate::ignore_list::IgnoreSet;
use crate::source::{ContentRef, SourceEntry, TreeSource};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
        }
    }
}

/// One node of a built tree snapshot. `path` is slash-joined, relative to the
/// chosen root (the root's own path is empty) and unique across the tree.
/// File nodes carry a content reference and never have children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    pub path: String,
    pub children: Vec<TreeNode>,
    content: Option<ContentRef>,
}

impl TreeNode {
    pub fn content_ref(&self) -> Option<&ContentRef> {
        self.content.as_ref()
    }

    /// Looks a node up by its relative path within this subtree.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| {
            let is_ancestor = child.kind == NodeKind::Directory
                && path.starts_with(&format!("{}/", child.path));
            if child.path == path || is_ancestor {
                child.find(path)
            } else {
                None
            }
        })
    }

    /// Visits every File node of this subtree, depth-first in tree order.
    pub fn for_each_file<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        if self.kind == NodeKind::File {
            visit(self);
        }
        for child in &self.children {
            child.for_each_file(visit);
        }
    }

    pub fn file_count(&self) -> usize {
        let mut count = 0;
        self.for_each_file(&mut |_| count += 1);
        count
    }
}

// Serialized as { name, type, path, children } with children present only on
// directories and the content handle skipped entirely.
impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.kind == NodeKind::Directory { 4 } else { 3 };
        let mut state = serializer.serialize_struct("TreeNode", fields)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", self.kind.as_str())?;
        state.serialize_field("path", &self.path)?;
        if self.kind == NodeKind::Directory {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

/// Builds a tree snapshot from a source, skipping every directory whose bare
/// name is in the ignore set (descendants included). Files are never
/// filtered. An enumeration failure anywhere aborts the whole build.
pub fn build_tree(source: &dyn TreeSource, ignored: &IgnoreSet) -> Result<TreeNode> {
    log::debug!(
        "Building tree for root '{}' ({} ignored names)",
        source.root_name(),
        ignored.len()
    );
    let children = build_children(source, "", ignored)?;
    let root = TreeNode {
        name: source.root_name().to_string(),
        kind: NodeKind::Directory,
        path: String::new(),
        children,
        content: None,
    };
    log::debug!("Tree built: {} files", root.file_count());
    Ok(root)
}

fn build_children(
    source: &dyn TreeSource,
    dir_path: &str,
    ignored: &IgnoreSet,
) -> Result<Vec<TreeNode>> {
    let mut children = Vec::new();
    for entry in source.list(dir_path)? {
        match entry {
            SourceEntry::Directory { name } => {
                if ignored.contains(&name) {
                    log::trace!("Skipping ignored directory: {name}");
                    continue;
                }
                let path = join_path(dir_path, &name);
                let grandchildren = build_children(source, &path, ignored)?;
                children.push(TreeNode {
                    name,
                    kind: NodeKind::Directory,
                    path,
                    children: grandchildren,
                    content: None,
                });
            }
            SourceEntry::File { name, content } => {
                let path = join_path(dir_path, &name);
                children.push(TreeNode {
                    name,
                    kind: NodeKind::File,
                    path,
                    children: Vec::new(),
                    content: Some(content),
                });
            }
        }
    }
    children.sort_by(node_order);
    Ok(children)
}

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}

// Directories before files; ties broken by case-aware name order.
fn node_order(a: &TreeNode, b: &TreeNode) -> Ordering {
    match (a.kind, b.kind) {
        (NodeKind::Directory, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Directory) => Ordering::Greater,
        _ => name_order(&a.name, &b.name),
    }
}

fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::source::MemorySource;
    use std::path::PathBuf;

    fn sample_source() -> MemorySource {
        let mut source = MemorySource::new("proj");
        source.add_file("readme.md", "readme");
        source.add_file("src/main.rs", "fn main() {}");
        source.add_file("src/lib.rs", "pub fn lib() {}");
        source.add_file("node_modules/pkg/index.js", "module");
        source.add_dir("empty");
        source
    }

    #[test]
    fn directories_sort_before_files_then_by_name() {
        let mut source = MemorySource::new("proj");
        source.add_file("b.txt", "");
        source.add_file("A.txt", "");
        source.add_dir("zeta");
        source.add_dir("alpha");
        let tree = build_tree(&source, &IgnoreSet::new()).unwrap();

        let names: Vec<&str> = tree.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta", "A.txt", "b.txt"]);
    }

    #[test]
    fn ignored_directory_and_descendants_are_absent() {
        let source = sample_source();
        let mut ignored = IgnoreSet::new();
        ignored.add("node_modules");
        let tree = build_tree(&source, &ignored).unwrap();

        assert!(tree.find("node_modules").is_none());
        assert!(tree.find("node_modules/pkg/index.js").is_none());
        assert_eq!(tree.file_count(), 3);
    }

    #[test]
    fn ignore_matches_bare_names_not_files() {
        let mut source = MemorySource::new("proj");
        source.add_file("build", "a file literally named build");
        source.add_file("sub/build/out.txt", "nested");
        let mut ignored = IgnoreSet::new();
        ignored.add("build");
        let tree = build_tree(&source, &ignored).unwrap();

        // The file named "build" survives; the directory does not.
        assert!(tree.find("build").is_some());
        assert!(tree.find("sub/build").is_none());
        assert!(tree.find("sub/build/out.txt").is_none());
    }

    #[test]
    fn paths_are_slash_joined_and_unique() {
        let tree = build_tree(&sample_source(), &IgnoreSet::new()).unwrap();
        let mut paths = Vec::new();
        collect_paths(&tree, &mut paths);
        assert_eq!(tree.path, "");
        assert!(paths.contains(&"src/main.rs".to_string()));
        let mut deduped = paths.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), paths.len());
    }

    fn collect_paths(node: &TreeNode, out: &mut Vec<String>) {
        out.push(node.path.clone());
        for child in &node.children {
            collect_paths(child, out);
        }
    }

    #[test]
    fn empty_directory_is_kept() {
        let tree = build_tree(&sample_source(), &IgnoreSet::new()).unwrap();
        let empty = tree.find("empty").expect("empty dir should be present");
        assert_eq!(empty.kind, NodeKind::Directory);
        assert!(empty.children.is_empty());
    }

    #[test]
    fn build_is_deterministic() {
        let source = sample_source();
        let ignored = IgnoreSet::with_defaults();
        let first = build_tree(&source, &ignored).unwrap();
        let second = build_tree(&source, &ignored).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn enumeration_failure_aborts_the_build() {
        struct BrokenSource;
        impl TreeSource for BrokenSource {
            fn root_name(&self) -> &str {
                "broken"
            }
            fn list(&self, dir_path: &str) -> Result<Vec<SourceEntry>> {
                Err(AppError::Enumeration {
                    path: PathBuf::from(dir_path),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                })
            }
        }

        let err = build_tree(&BrokenSource, &IgnoreSet::new()).unwrap_err();
        assert!(matches!(err, AppError::Enumeration { .. }));
    }

    #[test]
    fn serializes_with_type_tag_and_directory_children() {
        let mut source = MemorySource::new("proj");
        source.add_file("a.txt", "x");
        let tree = build_tree(&source, &IgnoreSet::new()).unwrap();

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["type"], "directory");
        assert_eq!(json["children"][0]["type"], "file");
        assert_eq!(json["children"][0]["path"], "a.txt");
        assert!(json["children"][0].get("children").is_none());
        assert!(json["children"][0].get("content").is_none());
    }

    #[test]
    fn find_resolves_nested_paths() {
        let tree = build_tree(&sample_source(), &IgnoreSet::new()).unwrap();
        assert_eq!(tree.find("").unwrap().name, "proj");
        assert_eq!(tree.find("src/lib.rs").unwrap().kind, NodeKind::File);
        assert!(tree.find("src/nope.rs").is_none());
    }
}
