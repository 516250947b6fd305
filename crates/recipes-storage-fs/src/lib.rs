//! Filesystem content tree for the recipes server.
//!
//! Provides [`FsContentTree`], the [`ContentTree`] implementation backed by a
//! directory on disk. Every call reads the live directory state; nothing is
//! cached between calls.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use recipes_storage::ContentTree;
//! use recipes_storage_fs::FsContentTree;
//!
//! let tree = FsContentTree::new(PathBuf::from("."));
//! for path in tree.markdown_files()? {
//!     println!("{path}");
//! }
//! ```

mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

use recipes_storage::{ContentTree, StorageError, StorageErrorKind, validate_path};

use crate::scanner::Scanner;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem content tree rooted at a directory.
#[derive(Debug, Clone)]
pub struct FsContentTree {
    root: PathBuf,
}

impl FsContentTree {
    /// Create a tree rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve a validated relative path against the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_path(path).map_err(|e| e.with_backend(BACKEND))?;
        Ok(path.split('/').fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }

    /// List non-hidden entries of a directory, keeping those accepted by `keep`.
    fn list(
        &self,
        dir: &Path,
        keep: impl Fn(&fs::FileType) -> bool,
    ) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(dir)
            .map_err(|e| StorageError::io(e, Some(dir.to_path_buf())).with_backend(BACKEND))?;

        Ok(entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| keep(&t)))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| !name.starts_with('.'))
            .collect())
    }
}

impl ContentTree for FsContentTree {
    fn dirs(&self) -> Result<Vec<String>, StorageError> {
        self.list(&self.root, fs::FileType::is_dir)
    }

    fn files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        if dir.contains('/') {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(dir)
                .with_backend(BACKEND));
        }
        let dir_path = self.resolve(dir)?;
        self.list(&dir_path, |t| !t.is_dir())
    }

    fn markdown_files(&self) -> Result<Vec<String>, StorageError> {
        Scanner::new(self.root.clone())
            .scan()
            .map_err(|e| StorageError::io(e, Some(self.root.clone())).with_backend(BACKEND))
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let file_path = self.resolve(path)?;
        fs::read_to_string(&file_path)
            .map_err(|e| StorageError::io(e, Some(file_path)).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn create_tree() -> (tempfile::TempDir, FsContentTree) {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README.md"), "# Recipes").unwrap();

        let routing = root.join("routing");
        fs::create_dir(&routing).unwrap();
        fs::write(routing.join("README.md"), "# Routing").unwrap();
        fs::write(routing.join("basics.md"), "# Basics").unwrap();

        fs::create_dir(root.join("config")).unwrap();
        fs::create_dir(root.join(".git")).unwrap();

        let tree = FsContentTree::new(root.to_path_buf());
        (temp_dir, tree)
    }

    #[test]
    fn test_dirs_lists_first_level_directories() {
        let (_temp_dir, tree) = create_tree();

        let mut dirs = tree.dirs().unwrap();
        dirs.sort();

        assert_eq!(dirs, vec!["config", "routing"]);
    }

    #[test]
    fn test_dirs_missing_root() {
        let tree = FsContentTree::new(PathBuf::from("/nonexistent/recipes"));

        assert!(tree.dirs().unwrap_err().is_not_found());
    }

    #[test]
    fn test_files_lists_files_only() {
        let (temp_dir, tree) = create_tree();
        fs::create_dir(temp_dir.path().join("routing").join("sub")).unwrap();

        let mut files = tree.files("routing").unwrap();
        files.sort();

        assert_eq!(files, vec!["README.md", "basics.md"]);
    }

    #[test]
    fn test_files_rejects_traversal() {
        let (_temp_dir, tree) = create_tree();

        for dir in ["..", ".", "routing/..", ""] {
            let err = tree.files(dir).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidPath, "dir: {dir:?}");
        }
    }

    #[test]
    fn test_markdown_files() {
        let (_temp_dir, tree) = create_tree();

        assert_eq!(
            tree.markdown_files().unwrap(),
            vec!["README.md", "routing/README.md", "routing/basics.md"]
        );
    }

    #[test]
    fn test_read() {
        let (_temp_dir, tree) = create_tree();

        assert_eq!(tree.read("routing/basics.md").unwrap(), "# Basics");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let (_temp_dir, tree) = create_tree();

        let err = tree.read("routing/missing.md").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_read_rejects_escape() {
        let (temp_dir, _tree) = create_tree();
        let inner = temp_dir.path().join("routing");
        fs::write(temp_dir.path().join("secret.md"), "secret").unwrap();
        let tree = FsContentTree::new(inner);

        let err = tree.read("../secret.md").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }
}
