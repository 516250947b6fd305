//! Static file serving.
//!
//! Requests that match no page route are served from the public directory
//! (`normalize.css`, scripts, images). Anything else gets the HTML 404 page.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::http::Uri;
use tower_http::services::ServeDir;

use crate::error::ServerError;
use crate::state::AppState;

/// Create router serving `public_dir` with an HTML not-found fallback.
pub(crate) fn static_router(public_dir: &Path) -> Router<Arc<AppState>> {
    let serve_dir = ServeDir::new(public_dir).not_found_service(not_found.into_service());
    Router::new().fallback_service(serve_dir)
}

/// Fallback for unknown paths.
async fn not_found(uri: Uri) -> ServerError {
    ServerError::PageNotFound(uri.path().to_owned())
}
