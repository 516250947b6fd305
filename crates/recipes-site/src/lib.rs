//! Topic index and page context for the recipes server.
//!
//! This crate provides:
//! - [`ContentIndex`]: topics, table of contents and per-topic articles,
//!   derived from a [`ContentTree`](recipes_storage::ContentTree) on every call
//! - [`IgnoreSet`]: which first-level directories are not topics
//! - [`PageContext`]: the menu, table of contents and route-specific data
//!   handed to the page layout
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use recipes_site::{ContentIndex, IgnoreSet, PageContext, Route};
//! use recipes_storage_fs::FsContentTree;
//!
//! let tree = Arc::new(FsContentTree::new(PathBuf::from(".")));
//! let index = ContentIndex::new(tree, IgnoreSet::default());
//!
//! let context = PageContext::build(&index, Route::Topic("routing".to_owned()))?;
//! # Ok::<(), recipes_site::SiteError>(())
//! ```

mod context;
mod ignore;
mod index;

pub use context::{Contributor, PageContext, Route};
pub use ignore::{DEFAULT_IGNORED_DIRS, IgnoreSet};
pub use index::{ContentIndex, SiteError, TableOfContents};
