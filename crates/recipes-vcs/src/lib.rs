//! Git revision lookup for the recipes server.
//!
//! In production the server validates cached responses against the content
//! repository's HEAD commit. [`Revision::discover`] reads it once at startup:
//! the abbreviated commit id becomes the entity tag and the commit time
//! becomes `Last-Modified`.

use std::path::Path;

use chrono::{DateTime, Utc};

/// Length of the abbreviated commit id.
const SHORT_ID_LEN: usize = 7;

/// Revision lookup error.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// No repository contains the given directory.
    #[error("no git repository found at {path}")]
    Discover {
        /// Directory the search started from.
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// HEAD does not point to a readable commit.
    #[error("cannot read HEAD commit")]
    HeadCommit(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Commit time is missing or out of range.
    #[error("invalid commit time")]
    CommitTime(#[source] Option<Box<dyn std::error::Error + Send + Sync>>),
}

/// The HEAD commit of the content repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revision {
    /// Abbreviated commit id.
    pub sha: String,
    /// Commit time.
    pub committed_at: DateTime<Utc>,
}

impl Revision {
    /// Create a revision from known values.
    #[must_use]
    pub fn new(sha: impl Into<String>, committed_at: DateTime<Utc>) -> Self {
        Self {
            sha: sha.into(),
            committed_at,
        }
    }

    /// Read the HEAD commit of the repository containing `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`VcsError`] if no repository is found, HEAD is unborn, or the
    /// commit cannot be decoded.
    pub fn discover(dir: &Path) -> Result<Self, VcsError> {
        let repo = gix::discover(dir).map_err(|e| VcsError::Discover {
            path: dir.display().to_string(),
            source: Box::new(e),
        })?;
        let commit = repo
            .head_commit()
            .map_err(|e| VcsError::HeadCommit(Box::new(e)))?;
        let time = commit
            .time()
            .map_err(|e| VcsError::CommitTime(Some(Box::new(e))))?;
        let committed_at =
            DateTime::from_timestamp(time.seconds, 0).ok_or(VcsError::CommitTime(None))?;

        Ok(Self {
            sha: commit.id.to_hex_with_len(SHORT_ID_LEN).to_string(),
            committed_at,
        })
    }

    /// Strong entity tag for this revision (quoted).
    #[must_use]
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.sha)
    }

    /// Commit time formatted as an HTTP date.
    #[must_use]
    pub fn last_modified(&self) -> String {
        self.committed_at
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::process::Command;

    use super::*;

    /// Run git in `dir` with a fixed identity and commit date.
    fn git(dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(["-c", "user.name=Recipes", "-c", "user.email=recipes@example.com"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_DATE", "@1700000000 +0000")
            .env("GIT_COMMITTER_DATE", "@1700000000 +0000")
            .output()
            .unwrap();
        assert!(output.status.success(), "git {args:?} failed: {output:?}");
        String::from_utf8(output.stdout).unwrap().trim().to_owned()
    }

    fn create_repository() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir(root.join("routing")).unwrap();
        std::fs::write(root.join("README.md"), "# Recipes").unwrap();
        std::fs::write(root.join("routing").join("README.md"), "# Routing").unwrap();
        git(root, &["init", "--quiet"]);
        git(root, &["add", "."]);
        git(root, &["commit", "--quiet", "-m", "Add recipes"]);
        temp_dir
    }

    fn sample() -> Revision {
        let committed_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        Revision::new("a1b2c3d", committed_at)
    }

    #[test]
    fn test_etag_is_quoted_sha() {
        assert_eq!(sample().etag(), "\"a1b2c3d\"");
    }

    #[test]
    fn test_last_modified_http_date() {
        assert_eq!(sample().last_modified(), "Tue, 14 Nov 2023 22:13:20 GMT");
    }

    #[test]
    fn test_discover_reads_head_commit() {
        let temp_dir = create_repository();

        let revision = Revision::discover(temp_dir.path()).unwrap();

        assert_eq!(revision.sha.len(), SHORT_ID_LEN);
        assert_eq!(
            revision.sha,
            git(temp_dir.path(), &["rev-parse", "--short=7", "HEAD"])
        );
        assert_eq!(revision.committed_at.timestamp(), 1_700_000_000);
        assert_eq!(revision.last_modified(), "Tue, 14 Nov 2023 22:13:20 GMT");
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp_dir = create_repository();

        let from_root = Revision::discover(temp_dir.path()).unwrap();
        let from_topic = Revision::discover(&temp_dir.path().join("routing")).unwrap();

        assert_eq!(from_topic, from_root);
    }

    #[test]
    fn test_discover_unborn_head_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        git(temp_dir.path(), &["init", "--quiet"]);

        let err = Revision::discover(temp_dir.path()).unwrap_err();

        assert!(matches!(err, VcsError::HeadCommit(_)));
    }

    #[test]
    fn test_discover_outside_repository_fails() {
        let err = Revision::discover(Path::new("/nonexistent/recipes")).unwrap_err();

        assert!(matches!(err, VcsError::Discover { .. }));
        assert!(err.to_string().contains("/nonexistent/recipes"));
    }
}
