//! HTTP server for the recipes site.
//!
//! This crate provides an axum server rendering markdown recipes:
//! - `GET /` renders the root `README.md` with the contributor list
//! - `GET /p/{topic}` renders `{topic}/README.md` with the topic's articles
//! - `GET /p/{topic}/{article}` renders `{topic}/{article}.md`
//! - `GET /style.css` serves the site stylesheet
//! - anything else is served from the public directory, or answered with 404
//!
//! In production mode every successful response carries
//! `Cache-Control: public, must-revalidate` and, when the content root is a
//! git checkout, an `ETag` and `Last-Modified` taken from the HEAD commit.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use recipes_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         content_root: PathBuf::from("."),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod contributors;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use recipes_config::{Config, IgnoreMatch};
use recipes_renderer::MarkdownRenderer;
use recipes_site::{ContentIndex, DEFAULT_IGNORED_DIRS, IgnoreSet};
use recipes_storage::ContentTree;
use recipes_storage_fs::FsContentTree;
use recipes_vcs::Revision;
use state::AppState;

pub use contributors::{ContributorError, ContributorSource, HttpContributorSource};
pub use error::ServerError;
pub use middleware::caching::CachePolicy;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding topic directories and the home `README.md`.
    pub content_root: PathBuf,
    /// Directory of static files.
    pub public_dir: PathBuf,
    /// Directory names excluded from the topic menu.
    pub ignored_dirs: Vec<String>,
    /// Comparison mode for `ignored_dirs`.
    pub ignore_match: IgnoreMatch,
    /// Send caching headers.
    pub production: bool,
    /// Contributor list endpoint (`None` disables the list).
    pub contributors_url: Option<String>,
    /// Contributor request timeout.
    pub contributors_timeout: Duration,
    /// `max-age` for production responses, in seconds.
    pub max_age: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4567,
            content_root: PathBuf::from("."),
            public_dir: PathBuf::from("public"),
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|&d| d.to_owned()).collect(),
            ignore_match: IgnoreMatch::Exact,
            production: false,
            contributors_url: None,
            contributors_timeout: Duration::from_secs(10),
            max_age: 300,
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let state = Arc::new(build_state(config));

    let app = app::create_router(state);

    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Assemble handler state from configuration.
fn build_state(config: ServerConfig) -> AppState {
    let tree: Arc<dyn ContentTree> = Arc::new(FsContentTree::new(config.content_root.clone()));
    let index = ContentIndex::new(
        tree,
        IgnoreSet::new(&config.ignored_dirs, config.ignore_match),
    );

    let contributors = config.contributors_url.as_ref().map(|url| {
        Arc::new(HttpContributorSource::new(url.as_str(), config.contributors_timeout))
            as Arc<dyn ContributorSource>
    });

    let cache = config.production.then(|| CachePolicy {
        max_age: config.max_age,
        revision: discover_revision(&config.content_root),
    });

    AppState {
        index,
        renderer: MarkdownRenderer::new().with_title_extraction(),
        contributors,
        public_dir: config.public_dir,
        cache,
    }
}

/// Read the HEAD commit of the content repository, once, at startup.
fn discover_revision(content_root: &std::path::Path) -> Option<Revision> {
    match Revision::discover(content_root) {
        Ok(revision) => {
            tracing::info!(
                sha = %revision.sha,
                committed_at = %revision.committed_at,
                "Using content revision for caching"
            );
            Some(revision)
        }
        Err(e) => {
            tracing::warn!(error = %e, "No content revision, sending responses without validators");
            None
        }
    }
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from recipes config.
#[must_use]
pub fn server_config_from_config(config: &Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_root: config.content_resolved.root.clone(),
        public_dir: config.content_resolved.public_dir.clone(),
        ignored_dirs: config.content_resolved.ignored_dirs.clone(),
        ignore_match: config.content_resolved.ignore_match,
        production: config.server.environment.is_production(),
        contributors_url: config
            .contributors
            .enabled
            .then(|| config.contributors.url.clone()),
        contributors_timeout: Duration::from_secs(config.contributors.timeout_secs),
        max_age: config.cache.max_age,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_state_development() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            content_root: temp_dir.path().to_path_buf(),
            ..ServerConfig::default()
        };

        let state = build_state(config);

        assert!(state.cache.is_none());
        assert!(state.contributors.is_none());
    }

    #[test]
    fn test_build_state_production_without_repository() {
        let config = ServerConfig {
            content_root: PathBuf::from("/nonexistent/recipes"),
            production: true,
            contributors_url: Some("https://api.example.com/contributors".to_owned()),
            max_age: 120,
            ..ServerConfig::default()
        };

        let state = build_state(config);

        let cache = state.cache.unwrap();
        assert_eq!(cache.max_age, 120);
        assert!(cache.revision.is_none());
        assert!(state.contributors.is_some());
    }

    #[test]
    fn test_server_config_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("recipes.toml");
        std::fs::write(
            &config_path,
            r#"
[server]
port = 9000
environment = "production"

[content]
root = "content"
ignored_dirs = ["drafts"]
ignore_match = "substring"

[contributors]
enabled = false

[cache]
max_age = 60
"#,
        )
        .unwrap();
        let config = Config::load(Some(config_path.as_path()), None).unwrap();

        let server_config = server_config_from_config(&config);

        assert_eq!(server_config.port, 9000);
        assert!(server_config.production);
        assert_eq!(server_config.content_root, temp_dir.path().join("content"));
        assert_eq!(server_config.ignored_dirs, vec!["drafts"]);
        assert_eq!(server_config.ignore_match, IgnoreMatch::Substring);
        assert_eq!(server_config.contributors_url, None);
        assert_eq!(server_config.max_age, 60);
    }
}
