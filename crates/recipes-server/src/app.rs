//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{pages, stylesheet};
use crate::middleware::{caching, security};
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(pages::get_home))
        .route("/p/{topic}", get(pages::get_topic))
        .route("/p/{topic}/{article}", get(pages::get_article))
        .route("/style.css", get(stylesheet::get_stylesheet))
        .merge(static_files::static_router(&state.public_dir));

    if let Some(policy) = &state.cache {
        router = router.layer(axum::middleware::from_fn_with_state(
            Arc::new(policy.clone()),
            caching::caching_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
