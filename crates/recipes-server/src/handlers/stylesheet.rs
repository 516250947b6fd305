//! Stylesheet endpoint.

use axum::http::header;
use axum::response::IntoResponse;
use recipes_renderer::STYLESHEET;

/// Handle GET /style.css.
pub(crate) async fn get_stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
