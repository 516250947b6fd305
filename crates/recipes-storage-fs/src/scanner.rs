//! Markdown discovery by filesystem walking.
//!
//! The Scanner only identifies files; it never reads content. Paths are
//! returned relative to the root, joined with `/` regardless of platform.

use std::fs;
use std::path::{Path, PathBuf};

/// Walks the content root collecting markdown file paths.
pub(crate) struct Scanner {
    root: PathBuf,
}

impl Scanner {
    /// Create a new Scanner for `root`.
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Scan the tree and return relative paths of every `.md` file.
    ///
    /// Entries of each directory are visited sorted by name, so the result
    /// is stable for a fixed tree. Hidden files and directories are skipped.
    /// Unreadable subdirectories are skipped; only a failure to list the
    /// root itself is reported.
    pub(crate) fn scan(&self) -> std::io::Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)?;
        let mut paths = Vec::new();
        Self::scan_entries(entries, "", &mut paths);
        Ok(paths)
    }

    fn scan_directory(dir_path: &Path, url_prefix: &str, paths: &mut Vec<String>) {
        match fs::read_dir(dir_path) {
            Ok(entries) => Self::scan_entries(entries, url_prefix, paths),
            Err(e) => {
                tracing::debug!(
                    path = %dir_path.display(),
                    error = %e,
                    "Skipping unreadable directory"
                );
            }
        }
    }

    fn scan_entries(entries: fs::ReadDir, url_prefix: &str, paths: &mut Vec<String>) {
        // Collect entries with cached file_type to avoid repeated stat calls in sort
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e, is_dir, name)
            })
            .filter(|(_, _, name)| !name.starts_with('.'))
            .collect();

        entries.sort_by(|(_, _, a), (_, _, b)| a.cmp(b));

        for (entry, is_dir, name) in entries {
            let rel = join_relative(url_prefix, &name);
            if is_dir {
                Self::scan_directory(&entry.path(), &rel, paths);
            } else if Path::new(&name).extension().is_some_and(|e| e == "md") {
                paths.push(rel);
            }
        }
    }
}

/// Join a relative prefix and a name with `/`.
pub(crate) fn join_relative(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
