use crate::error::{AppError, Result};
use crate::selection::SelectionSet;
use std::path::PathBuf;

/// Delimiter line emitted before and after each extracted file block.
pub const BLOCK_DELIMITER: &str = "= = = = =";

/// Serializes the selected files into one text document: per file the
/// delimiter line, the path, the raw content, and the delimiter line again,
/// in ascending path order, all joined by newlines.
///
/// Fails as a whole on the first unreadable file, naming its path; partial
/// output is never produced. An empty selection yields an empty document.
pub fn extract_selected(selection: &SelectionSet) -> Result<String> {
    log::debug!("Extracting {} selected files", selection.len());
    let mut lines = Vec::with_capacity(selection.len() * 4);
    for (path, content) in selection.iter() {
        let text = content.read_text().map_err(|source| AppError::FileRead {
            path: PathBuf::from(path),
            source,
        })?;
        lines.push(BLOCK_DELIMITER.to_string());
        lines.push(path.to_string());
        lines.push(text);
        lines.push(BLOCK_DELIMITER.to_string());
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore_list::IgnoreSet;
    use crate::source::{ContentRef, MemorySource};
    use crate::tree::build_tree;

    fn two_file_source() -> MemorySource {
        let mut source = MemorySource::new("proj");
        source.add_file("a/x.txt", "hello");
        source.add_file("a/b/y.md", "world");
        source
    }

    #[test]
    fn single_file_block_format() {
        let source = two_file_source();
        let mut ignored = IgnoreSet::new();
        ignored.add("b");
        let tree = build_tree(&source, &ignored).unwrap();
        assert_eq!(tree.file_count(), 1);

        let mut selection = SelectionSet::new();
        selection.select_all(&tree);
        let document = extract_selected(&selection).unwrap();
        assert_eq!(document, "= = = = =\na/x.txt\nhello\n= = = = =");
    }

    #[test]
    fn blocks_are_ordered_by_ascending_path() {
        let source = two_file_source();
        let tree = build_tree(&source, &IgnoreSet::new()).unwrap();
        let mut selection = SelectionSet::new();
        selection.select_all(&tree);

        let document = extract_selected(&selection).unwrap();
        assert_eq!(
            document,
            "= = = = =\na/b/y.md\nworld\n= = = = =\n\
             = = = = =\na/x.txt\nhello\n= = = = ="
        );
    }

    #[test]
    fn raw_content_is_preserved_verbatim() {
        let mut source = MemorySource::new("proj");
        source.add_file("notes.txt", "first\nsecond\n");
        let tree = build_tree(&source, &IgnoreSet::new()).unwrap();
        let mut selection = SelectionSet::new();
        selection.select_all(&tree);

        let document = extract_selected(&selection).unwrap();
        assert_eq!(document, "= = = = =\nnotes.txt\nfirst\nsecond\n\n= = = = =");
    }

    #[test]
    fn empty_selection_extracts_to_empty_document() {
        let selection = SelectionSet::new();
        assert_eq!(extract_selected(&selection).unwrap(), "");
    }

    #[test]
    fn read_failure_aborts_and_names_the_path() {
        let mut selection = SelectionSet::new();
        selection.set_file("ok.txt", ContentRef::Inline("fine".into()));
        selection.set_file(
            "vanished.txt",
            ContentRef::Disk(std::path::PathBuf::from("/no/such/file")),
        );

        let err = extract_selected(&selection).unwrap_err();
        match err {
            AppError::FileRead { path, .. } => {
                assert_eq!(path, std::path::PathBuf::from("vanished.txt"));
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
    }
}
