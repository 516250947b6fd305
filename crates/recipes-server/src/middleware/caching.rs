//! Production caching headers.
//!
//! Successful responses get `Cache-Control: public, must-revalidate` and,
//! when the content revision is known, `ETag` and `Last-Modified` taken from
//! the HEAD commit. Conditional GET requests that match the revision are
//! answered with `304 Not Modified` before the handler runs.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use recipes_vcs::Revision;

/// Caching rules applied to every response.
#[derive(Clone, Debug)]
pub struct CachePolicy {
    /// `max-age` directive in seconds.
    pub max_age: u32,
    /// Content revision providing the validators, if known.
    pub revision: Option<Revision>,
}

impl CachePolicy {
    /// `Cache-Control` header value.
    #[must_use]
    pub fn cache_control(&self) -> String {
        format!("public, must-revalidate, max-age={}", self.max_age)
    }

    /// Whether the client's cached copy is still current.
    ///
    /// `If-None-Match` takes precedence over `If-Modified-Since`.
    #[must_use]
    pub fn is_fresh(&self, headers: &HeaderMap) -> bool {
        let Some(revision) = &self.revision else {
            return false;
        };

        if let Some(value) = headers.get(header::IF_NONE_MATCH) {
            return value
                .to_str()
                .is_ok_and(|v| etag_matches(v, &revision.etag()));
        }

        headers
            .get(header::IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
            .is_some_and(|since| since.with_timezone(&Utc) >= revision.committed_at)
    }

    /// Insert the caching headers.
    pub fn apply(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.cache_control()) {
            headers.insert(header::CACHE_CONTROL, value);
        }

        let Some(revision) = &self.revision else {
            return;
        };
        if let Ok(value) = HeaderValue::from_str(&revision.etag()) {
            headers.insert(header::ETAG, value);
        }
        if let Ok(value) = HeaderValue::from_str(&revision.last_modified()) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }
}

/// Middleware applying a [`CachePolicy`].
pub(crate) async fn caching_middleware(
    State(policy): State<Arc<CachePolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let conditional = matches!(*request.method(), Method::GET | Method::HEAD);

    if conditional && policy.is_fresh(request.headers()) {
        tracing::debug!(path = %request.uri().path(), "Not modified");
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        policy.apply(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    if response.status().is_success() {
        policy.apply(response.headers_mut());
    }
    response
}

/// Match an `If-None-Match` value against a strong entity tag.
fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match
        .split(',')
        .map(str::trim)
        .any(|tag| tag == "*" || tag.trim_start_matches("W/") == etag)
}
