//! Contributor list client.
//!
//! The home page footer shows the people who contributed recipes. The list is
//! fetched from a JSON endpoint on every home page request. Network failures
//! are not fatal: the page is rendered without the list.

use std::time::Duration;

use recipes_site::Contributor;
use ureq::Agent;

const USER_AGENT: &str = concat!("recipes/", env!("CARGO_PKG_VERSION"));

/// Error fetching the contributor list.
#[derive(Debug, thiserror::Error)]
pub enum ContributorError {
    /// Endpoint answered with a non-success status.
    #[error("HTTP error: {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Request or response decoding failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ureq::Error),
}

/// Source of the contributor list.
pub trait ContributorSource: Send + Sync {
    /// Fetch the contributor list.
    ///
    /// Returns `Ok(None)` when the endpoint is unreachable.
    fn fetch(&self) -> Result<Option<Vec<Contributor>>, ContributorError>;
}

/// Contributor source backed by an HTTP endpoint returning a JSON array of
/// `{login, gravatar_id}` objects.
pub struct HttpContributorSource {
    agent: Agent,
    url: String,
}

impl HttpContributorSource {
    /// Create a source for `url` with a global request timeout.
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            url: url.into(),
        }
    }

    fn request(&self) -> Result<Vec<Contributor>, ContributorError> {
        let response = self
            .agent
            .get(&self.url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .call()?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(ContributorError::Status {
                status,
                url: self.url.clone(),
            });
        }

        let mut body = response.into_body();
        Ok(body.read_json()?)
    }
}

impl ContributorSource for HttpContributorSource {
    fn fetch(&self) -> Result<Option<Vec<Contributor>>, ContributorError> {
        match self.request() {
            Ok(contributors) => {
                tracing::debug!(count = contributors.len(), "Fetched contributors");
                Ok(Some(contributors))
            }
            Err(ContributorError::Request(e)) if is_network_failure(&e) => {
                tracing::warn!(url = %self.url, error = %e, "Contributor endpoint unreachable");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Whether `error` means the endpoint could not be reached at all.
pub(crate) fn is_network_failure(error: &ureq::Error) -> bool {
    matches!(
        error,
        ureq::Error::HostNotFound
            | ureq::Error::ConnectionFailed
            | ureq::Error::Io(_)
            | ureq::Error::Timeout(_)
    )
}
