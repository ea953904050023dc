//! Markdown detection for files and directories.
//!
//! A directory is a *wiki section* when at least one Markdown file lives
//! somewhere beneath it. Everything the generator writes hangs off this
//! predicate: sections get an `index.md`, appear as categories in their
//! parent's index, and (at depth 1) are offered for the navigation menu.
//!
//! Classification reads directory metadata only. Unreadable directories are
//! errors, never "no Markdown here": silently skipping them would produce a
//! wiki that looks complete but is missing sections.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const MARKDOWN_EXTENSION: &str = ".md";

/// True iff `path` is a regular file whose name ends in `.md`.
///
/// The check is by name only; file contents are never inspected.
pub fn is_markdown_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with(MARKDOWN_EXTENSION))
}

/// True iff the directory contains Markdown.
///
/// - `recursive = false`: only direct children are considered.
/// - `recursive = true`: any file at any depth counts; returns on the first
///   match without enumerating the rest of the subtree.
pub fn is_wiki_directory(path: &Path, recursive: bool) -> Result<bool, ClassifyError> {
    if !path.is_dir() {
        return Err(ClassifyError::NotADirectory(path.to_path_buf()));
    }

    if recursive {
        for entry in WalkDir::new(path).min_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_dir() && is_markdown_file(entry.path()) {
                return Ok(true);
            }
        }
    } else {
        for entry in std::fs::read_dir(path)? {
            if is_markdown_file(&entry?.path()) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Recursively classify several directories at once.
///
/// The scans are independent and read-only, so they run on the rayon pool.
/// Results come back in input order; any error fails the whole batch.
pub fn classify_dirs(dirs: &[PathBuf]) -> Result<Vec<bool>, ClassifyError> {
    dirs.par_iter()
        .map(|d| is_wiki_directory(d, true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_tree;
    use tempfile::TempDir;

    #[test]
    fn markdown_file_by_extension() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["a.md", "b.txt", "c.markdown"]);

        assert!(is_markdown_file(&tmp.path().join("a.md")));
        assert!(!is_markdown_file(&tmp.path().join("b.txt")));
        assert!(!is_markdown_file(&tmp.path().join("c.markdown")));
    }

    #[test]
    fn extension_is_case_sensitive() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["LOUD.MD"]);
        assert!(!is_markdown_file(&tmp.path().join("LOUD.MD")));
    }

    #[test]
    fn directory_named_like_markdown_is_not_a_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("odd.md")).unwrap();
        assert!(!is_markdown_file(&tmp.path().join("odd.md")));
    }

    #[test]
    fn missing_path_is_not_markdown() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_markdown_file(&tmp.path().join("ghost.md")));
    }

    #[test]
    fn not_a_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["a.md"]);

        let result = is_wiki_directory(&tmp.path().join("a.md"), true);
        assert!(matches!(result, Err(ClassifyError::NotADirectory(_))));
    }

    #[test]
    fn empty_directory_is_not_wiki() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_wiki_directory(tmp.path(), true).unwrap());
        assert!(!is_wiki_directory(tmp.path(), false).unwrap());
    }

    #[test]
    fn only_non_markdown_is_not_wiki() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["a.txt", "sub/b.html"]);
        assert!(!is_wiki_directory(tmp.path(), true).unwrap());
    }

    #[test]
    fn direct_markdown_counts_in_both_modes() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["page.md"]);
        assert!(is_wiki_directory(tmp.path(), false).unwrap());
        assert!(is_wiki_directory(tmp.path(), true).unwrap());
    }

    #[test]
    fn nested_markdown_only_counts_recursively() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["deep/er/still/page.md"]);
        assert!(!is_wiki_directory(tmp.path(), false).unwrap());
        assert!(is_wiki_directory(tmp.path(), true).unwrap());
    }

    #[test]
    fn markdown_named_directory_does_not_count() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("fake.md/inner")).unwrap();
        assert!(!is_wiki_directory(tmp.path(), true).unwrap());
    }

    #[test]
    fn classify_dirs_preserves_order() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["a/x.md", "b/x.txt", "c/d/x.md"]);

        let dirs: Vec<PathBuf> = ["a", "b", "c"].iter().map(|d| tmp.path().join(d)).collect();
        assert_eq!(classify_dirs(&dirs).unwrap(), vec![true, false, true]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_propagates() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &["locked/secret.txt"]);
        let locked = tmp.path().join("locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read anything; nothing to assert then.
        let readable = std::fs::read_dir(&locked).is_ok();
        let result = is_wiki_directory(tmp.path(), true);
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert!(matches!(result, Err(ClassifyError::Walk(_))));
        }
    }
}
