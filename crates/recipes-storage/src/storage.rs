//! Content tree trait and error types.
//!
//! Provides the core [`ContentTree`] trait for reading the recipe tree,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Path Convention
//!
//! All path parameters are relative, `/`-separated paths from the content root:
//! - `"README.md"` - home page
//! - `"routing"` - topic directory
//! - `"routing/README.md"` - topic landing page
//! - `"routing/nested_routes.md"` - article
//!
//! Paths containing `..` or `.` components, backslashes, or a leading slash are
//! rejected with [`StorageErrorKind::InvalidPath`].

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Whether this error means the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => StorageErrorKind::Timeout,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Timeout => "Timeout",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Validate that a relative path cannot escape the content root.
///
/// Rejects empty paths, absolute paths, backslashes and any `.` or `..`
/// segment (e.g., `../../etc/passwd`).
///
/// # Errors
///
/// Returns [`StorageErrorKind::InvalidPath`] for rejected paths.
pub fn validate_path(path: &str) -> Result<(), StorageError> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(StorageError::new(StorageErrorKind::InvalidPath).with_path(path));
    }
    Ok(())
}

/// Read-only view of the content root.
///
/// Topics are first-level directories; articles are markdown files inside
/// them. Implementations skip hidden entries (names starting with `.`).
pub trait ContentTree: Send + Sync {
    /// Names of first-level directories under the root, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the root cannot be listed.
    fn dirs(&self) -> Result<Vec<String>, StorageError>;

    /// Names of the files directly inside a first-level directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidPath`] for a `dir` that is not a single
    /// path segment, or another [`StorageError`] if the directory cannot be listed.
    fn files(&self, dir: &str) -> Result<Vec<String>, StorageError>;

    /// Every `.md` file under the root, recursively, as relative paths.
    ///
    /// Paths are returned in walk order: entries of each directory sorted
    /// by name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the root cannot be listed.
    fn markdown_files(&self) -> Result<Vec<String>, StorageError>;

    /// Read a file's content.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the path is invalid, doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;
}
