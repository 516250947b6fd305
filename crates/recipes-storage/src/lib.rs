//! Content tree abstraction for the recipes server.
//!
//! This crate provides a [`ContentTree`] trait describing the content root as a
//! read-only tree: topic directories at the first level, markdown articles inside
//! them. Keeping the tree behind a trait lets the indexer run against an
//! in-memory fake in tests.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentTree`] trait with `dirs()`, `files()`, `markdown_files()` and
//!   `read()` methods
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockContentTree`] for testing (behind `mock` feature flag)
//!
//! The filesystem implementation lives in `recipes-storage-fs`.

#[cfg(any(test, feature = "mock"))]
mod mock;
mod storage;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockContentTree;
pub use storage::{ContentTree, StorageError, StorageErrorKind, validate_path};
