//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use recipes_renderer::{PageData, escape_html, render_page};
use recipes_site::SiteError;

use crate::contributors::ContributorError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No page exists at the requested path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Content tree or index failure.
    #[error("Site error: {0}")]
    Site(SiteError),

    /// Contributor list could not be fetched.
    #[error("Contributor fetch failed: {0}")]
    Contributors(#[from] ContributorError),

    /// Blocking task failed to complete.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<SiteError> for ServerError {
    fn from(e: SiteError) -> Self {
        if e.is_not_found() {
            Self::PageNotFound(e.to_string())
        } else {
            Self::Site(e)
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::PageNotFound(_) => (
                StatusCode::NOT_FOUND,
                "Not Found",
                "The recipe you are looking for does not exist.",
            ),
            Self::Site(_) | Self::Contributors(_) | Self::Task(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "Something went wrong while rendering this page.",
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Page not found");
        }

        let page = PageData {
            title: Some(title.to_owned()),
            content_html: format!("<h1>{title}</h1>\n<p>{}</p>\n", escape_html(message)),
            ..PageData::default()
        };

        (status, Html(render_page(&page))).into_response()
    }
}
