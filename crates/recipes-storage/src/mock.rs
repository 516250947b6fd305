//! Mock content tree for testing.
//!
//! Provides [`MockContentTree`] for unit testing without filesystem access.

use std::collections::BTreeSet;

use crate::storage::{ContentTree, StorageError, StorageErrorKind, validate_path};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory content tree for testing.
///
/// Files are kept in insertion order and may repeat, which lets tests feed the
/// indexer duplicate listings. Use the builder methods to configure test data.
///
/// # Example
///
/// ```ignore
/// use recipes_storage::{ContentTree, MockContentTree};
///
/// let tree = MockContentTree::new()
///     .with_file("README.md", "# Recipes")
///     .with_file("routing/README.md", "# Routing");
///
/// assert_eq!(tree.dirs().unwrap(), vec!["routing"]);
/// ```
#[derive(Debug, Default)]
pub struct MockContentTree {
    files: Vec<(String, String)>,
    dirs: Vec<String>,
    unavailable: bool,
}

impl MockContentTree {
    /// Create a new empty mock tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content at a relative path.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Add a first-level directory, even if it holds no files.
    #[must_use]
    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.dirs.push(name.into());
        self
    }

    /// Make every listing fail, as an unreadable root would.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied).with_backend(BACKEND));
        }
        Ok(())
    }

    fn has_dir(&self, dir: &str) -> bool {
        let prefix = format!("{dir}/");
        self.dirs.iter().any(|d| d == dir) || self.files.iter().any(|(p, _)| p.starts_with(&prefix))
    }
}

impl ContentTree for MockContentTree {
    fn dirs(&self) -> Result<Vec<String>, StorageError> {
        self.check_available()?;

        let mut names: BTreeSet<String> = self.dirs.iter().cloned().collect();
        for (path, _) in &self.files {
            if let Some((first, _)) = path.split_once('/') {
                names.insert(first.to_owned());
            }
        }
        Ok(names.into_iter().collect())
    }

    fn files(&self, dir: &str) -> Result<Vec<String>, StorageError> {
        self.check_available()?;
        validate_path(dir).map_err(|e| e.with_backend(BACKEND))?;
        if dir.contains('/') {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(dir)
                .with_backend(BACKEND));
        }
        if !self.has_dir(dir) {
            return Err(StorageError::not_found(dir).with_backend(BACKEND));
        }

        let prefix = format!("{dir}/");
        Ok(self
            .files
            .iter()
            .filter_map(|(path, _)| path.strip_prefix(&prefix))
            .filter(|name| !name.contains('/'))
            .map(str::to_owned)
            .collect())
    }

    fn markdown_files(&self) -> Result<Vec<String>, StorageError> {
        self.check_available()?;

        Ok(self
            .files
            .iter()
            .filter(|(path, _)| path.ends_with(".md"))
            .map(|(path, _)| path.clone())
            .collect())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        validate_path(path).map_err(|e| e.with_backend(BACKEND))?;

        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_tree() -> MockContentTree {
        MockContentTree::new()
            .with_file("README.md", "# Home")
            .with_file("routing/README.md", "# Routing")
            .with_file("routing/basics.md", "# Basics")
            .with_file("routing/deep/nested.md", "# Nested")
            .with_file("models/activerecord.md", "# AR")
            .with_dir("tmp")
    }

    #[test]
    fn test_dirs_are_unique_and_sorted() {
        let tree = sample_tree();

        assert_eq!(tree.dirs().unwrap(), vec!["models", "routing", "tmp"]);
    }

    #[test]
    fn test_files_lists_direct_children_only() {
        let tree = sample_tree();

        assert_eq!(
            tree.files("routing").unwrap(),
            vec!["README.md", "basics.md"]
        );
    }

    #[test]
    fn test_files_empty_dir() {
        let tree = sample_tree();

        assert!(tree.files("tmp").unwrap().is_empty());
    }

    #[test]
    fn test_files_missing_dir() {
        let tree = sample_tree();

        assert!(tree.files("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_files_rejects_traversal() {
        let tree = sample_tree();

        let err = tree.files("..").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
        let err = tree.files("routing/deep").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_markdown_files_keeps_insertion_order() {
        let tree = sample_tree().with_file("routing/notes.txt", "plain");

        assert_eq!(
            tree.markdown_files().unwrap(),
            vec![
                "README.md",
                "routing/README.md",
                "routing/basics.md",
                "routing/deep/nested.md",
                "models/activerecord.md",
            ]
        );
    }

    #[test]
    fn test_read() {
        let tree = sample_tree();

        assert_eq!(tree.read("routing/basics.md").unwrap(), "# Basics");
        assert!(tree.read("routing/missing.md").unwrap_err().is_not_found());
        assert_eq!(
            tree.read("../secret.md").unwrap_err().kind,
            StorageErrorKind::InvalidPath
        );
    }

    #[test]
    fn test_unavailable_tree_fails_listings() {
        let tree = sample_tree().unavailable();

        assert!(tree.dirs().is_err());
        assert!(tree.markdown_files().is_err());
        assert!(tree.files("routing").is_err());
    }
}
