//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use recipes_renderer::MarkdownRenderer;
use recipes_site::ContentIndex;

use crate::contributors::ContributorSource;
use crate::middleware::caching::CachePolicy;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Topic and article index over the content tree.
    pub(crate) index: ContentIndex,
    /// Markdown renderer with title extraction.
    pub(crate) renderer: MarkdownRenderer,
    /// Contributor list source (`None` disables the list).
    pub(crate) contributors: Option<Arc<dyn ContributorSource>>,
    /// Directory of static files served as a fallback.
    pub(crate) public_dir: PathBuf,
    /// Caching rules (production only).
    pub(crate) cache: Option<CachePolicy>,
}
