use crate::error::{AppError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Opaque handle to one file's content, resolved lazily at extraction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRef {
    /// Absolute path on disk, read through `std::fs` when dereferenced.
    Disk(PathBuf),
    /// In-memory content, used by [`MemorySource`] and tests.
    Inline(String),
}

impl ContentRef {
    /// Reads the full text content behind this handle. The caller attaches
    /// the tree-relative path when wrapping errors.
    pub fn read_text(&self) -> io::Result<String> {
        match self {
            ContentRef::Disk(path) => fs::read_to_string(path),
            ContentRef::Inline(content) => Ok(content.clone()),
        }
    }
}

/// One direct entry of an enumerated directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEntry {
    Directory { name: String },
    File { name: String, content: ContentRef },
}

impl SourceEntry {
    pub fn name(&self) -> &str {
        match self {
            SourceEntry::Directory { name } => name,
            SourceEntry::File { name, .. } => name,
        }
    }
}

/// The filesystem-access collaborator: enumerates directories and hands out
/// content references. Directory paths are slash-joined and relative to the
/// root; the root itself is the empty string.
pub trait TreeSource {
    fn root_name(&self) -> &str;

    /// Lists the direct entries of the directory at `dir_path`, in no
    /// particular order. Failing to enumerate is an
    /// [`AppError::Enumeration`] naming that path.
    fn list(&self, dir_path: &str) -> Result<Vec<SourceEntry>>;
}

/// A [`TreeSource`] backed by a real directory on disk.
pub struct DiskSource {
    root: PathBuf,
    root_name: String,
}

impl DiskSource {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AppError::InvalidArgument(format!(
                "Not a directory: {}",
                root.display()
            )));
        }
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Ok(Self { root, root_name })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, dir_path: &str) -> PathBuf {
        if dir_path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(dir_path)
        }
    }
}

impl TreeSource for DiskSource {
    fn root_name(&self) -> &str {
        &self.root_name
    }

    fn list(&self, dir_path: &str) -> Result<Vec<SourceEntry>> {
        let dir = self.resolve(dir_path);
        log::trace!("Enumerating directory: {}", dir.display());
        let enumeration_err = |source| AppError::Enumeration {
            path: dir.clone(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir).map_err(enumeration_err)? {
            let entry = entry.map_err(enumeration_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(enumeration_err)?;
            // Follow symlinks so a linked directory is browsed like any
            // other; a broken link falls through to a File node and fails
            // later as a FileRead.
            let is_dir = if file_type.is_symlink() {
                fs::metadata(entry.path()).map_or(false, |m| m.is_dir())
            } else {
                file_type.is_dir()
            };
            if is_dir {
                entries.push(SourceEntry::Directory { name });
            } else {
                entries.push(SourceEntry::File {
                    name,
                    content: ContentRef::Disk(entry.path()),
                });
            }
        }
        Ok(entries)
    }
}

/// A [`TreeSource`] over an in-memory path map. Deterministic ordering comes
/// from the tree builder's sort, not from this source.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    root_name: String,
    files: BTreeMap<String, String>,
    dirs: BTreeSet<String>,
}

impl MemorySource {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            files: BTreeMap::new(),
            dirs: BTreeSet::new(),
        }
    }

    /// Adds a file at a slash-joined relative path, registering every
    /// intermediate directory along the way.
    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) -> &mut Self {
        let path = path.into();
        self.register_parents(&path);
        self.files.insert(path, content.into());
        self
    }

    /// Registers a directory, possibly one with no files anywhere under it.
    pub fn add_dir(&mut self, path: impl Into<String>) -> &mut Self {
        let path = path.into();
        self.register_parents(&path);
        self.dirs.insert(path);
        self
    }

    fn register_parents(&mut self, path: &str) {
        let mut prefix = String::new();
        let parts: Vec<&str> = path.split('/').collect();
        for part in &parts[..parts.len() - 1] {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);
            self.dirs.insert(prefix.clone());
        }
    }

    fn is_known_dir(&self, dir_path: &str) -> bool {
        dir_path.is_empty() || self.dirs.contains(dir_path)
    }
}

impl TreeSource for MemorySource {
    fn root_name(&self) -> &str {
        &self.root_name
    }

    fn list(&self, dir_path: &str) -> Result<Vec<SourceEntry>> {
        if !self.is_known_dir(dir_path) {
            return Err(AppError::Enumeration {
                path: PathBuf::from(dir_path),
                source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            });
        }

        let prefix = if dir_path.is_empty() {
            String::new()
        } else {
            format!("{dir_path}/")
        };

        let mut entries = Vec::new();
        let mut seen_dirs = BTreeSet::new();

        for dir in &self.dirs {
            if let Some(rest) = dir.strip_prefix(&prefix) {
                if !rest.is_empty() && !rest.contains('/') && seen_dirs.insert(rest.to_string()) {
                    entries.push(SourceEntry::Directory {
                        name: rest.to_string(),
                    });
                }
            }
        }
        for (path, content) in &self.files {
            if let Some(rest) = path.strip_prefix(&prefix) {
                if !rest.is_empty() && !rest.contains('/') {
                    entries.push(SourceEntry::File {
                        name: rest.to_string(),
                        content: ContentRef::Inline(content.clone()),
                    });
                }
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_lists_direct_children_only() {
        let mut source = MemorySource::new("proj");
        source.add_file("a/x.txt", "hello");
        source.add_file("a/b/y.md", "world");
        source.add_file("top.rs", "fn main() {}");

        let root = source.list("").unwrap();
        let names: Vec<&str> = root.iter().map(|e| e.name()).collect();
        assert!(names.contains(&"a"));
        assert!(names.contains(&"top.rs"));
        assert_eq!(names.len(), 2);

        let a = source.list("a").unwrap();
        let names: Vec<&str> = a.iter().map(|e| e.name()).collect();
        assert!(names.contains(&"b"));
        assert!(names.contains(&"x.txt"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn memory_source_keeps_explicit_empty_dirs() {
        let mut source = MemorySource::new("proj");
        source.add_dir("empty");
        let root = source.list("").unwrap();
        assert_eq!(root.len(), 1);
        assert!(matches!(&root[0], SourceEntry::Directory { name } if name == "empty"));
        assert!(source.list("empty").unwrap().is_empty());
    }

    #[test]
    fn memory_source_unknown_dir_is_enumeration_error() {
        let source = MemorySource::new("proj");
        let err = source.list("missing").unwrap_err();
        assert!(matches!(err, AppError::Enumeration { .. }));
    }

    #[test]
    fn inline_content_reads_back_unchanged() {
        let content = ContentRef::Inline("line one\nline two\n".to_string());
        assert_eq!(content.read_text().unwrap(), "line one\nline two\n");
    }

    #[test]
    fn disk_content_read_fails_for_missing_file() {
        let content = ContentRef::Disk(PathBuf::from("/definitely/not/here.txt"));
        assert!(content.read_text().is_err());
    }
}
