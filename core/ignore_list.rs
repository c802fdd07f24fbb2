use once_cell::sync::Lazy;
use std::collections::BTreeSet;

/// Directory bare-names excluded from tree building out of the box.
static DEFAULT_IGNORED_DIRS: Lazy<BTreeSet<String>> = Lazy::new(|| {
    [".git", ".idea", ".venv", "__pycache__", "migrations", "node_modules"]
        .into_iter()
        .map(String::from)
        .collect()
});

/// A set of directory bare-names skipped at every level during tree building.
/// Matched by name, never by path. Session-lifetime only; editing it has no
/// effect on an already-built tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// An ignore set seeded with the default directory names.
    pub fn with_defaults() -> Self {
        Self {
            names: DEFAULT_IGNORED_DIRS.clone(),
        }
    }

    /// Adds a name, trimming surrounding whitespace. Returns false (no-op)
    /// when the trimmed name is empty or already present.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    /// Removes a name. Returns false (no-op) when it was absent.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name.trim())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// The current names in sorted order, for rendering and the next build.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Extend<String> for IgnoreSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for name in iter {
            self.add(&name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_and_rejects_empty() {
        let mut set = IgnoreSet::new();
        assert!(set.add("  target  "));
        assert!(set.contains("target"));
        assert!(!set.add("   "));
        assert!(!set.add(""));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn add_is_noop_for_duplicates() {
        let mut set = IgnoreSet::new();
        assert!(set.add("dist"));
        assert!(!set.add("dist"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_is_noop_when_absent() {
        let mut set = IgnoreSet::new();
        assert!(!set.remove("node_modules"));
        set.add("node_modules");
        assert!(set.remove("node_modules"));
        assert!(set.is_empty());
    }

    #[test]
    fn defaults_cover_common_vendor_dirs() {
        let set = IgnoreSet::with_defaults();
        assert!(set.contains("node_modules"));
        assert!(set.contains(".git"));
        assert!(set.contains("__pycache__"));
    }

    #[test]
    fn iter_is_sorted() {
        let mut set = IgnoreSet::new();
        set.add("zzz");
        set.add("aaa");
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(names, vec!["aaa", "zzz"]);
    }
}
