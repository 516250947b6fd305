//! Configuration management for the recipes server.
//!
//! Parses `recipes.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `server.host` and `contributors.url` may reference environment variables
//! as `${VAR}` (unset is an error) or `${VAR:-default}`. Bare `$VAR` is kept
//! verbatim.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content root directory.
    pub content_root: Option<PathBuf>,
    /// Override runtime environment.
    pub environment: Option<Environment>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "recipes.toml";

/// Default contributor endpoint.
const DEFAULT_CONTRIBUTORS_URL: &str =
    "https://api.github.com/repos/sinatra/sinatra-recipes/contributors";

/// Directory name fragments excluded from the topic menu by default.
const DEFAULT_IGNORED_DIRS: [&str; 5] = ["tmp", "log", "config", "public", "bin"];

/// Upper bound for `cache.max_age` (one year).
const MAX_CACHE_AGE: u32 = 31_536_000;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Contributor list configuration.
    pub contributors: ContributorsConfig,
    /// Production caching configuration.
    pub cache: CacheConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Runtime environment.
///
/// Production enables revision-based caching headers.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Whether this is the production environment.
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Runtime environment.
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4567,
            environment: Environment::Development,
        }
    }
}

/// How ignored directory names are compared with topic directories.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreMatch {
    /// Case-insensitive equality.
    #[default]
    Exact,
    /// Case-insensitive containment ("mylog" matches "log").
    Substring,
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root: Option<String>,
    public_dir: Option<String>,
    ignored_dirs: Option<Vec<String>>,
    ignore_match: Option<IgnoreMatch>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root directory holding topic directories.
    pub root: PathBuf,
    /// Directory of static files served as a fallback.
    pub public_dir: PathBuf,
    /// Directory name fragments excluded from the topic menu.
    pub ignored_dirs: Vec<String>,
    /// Comparison mode for `ignored_dirs`.
    pub ignore_match: IgnoreMatch,
}

/// Contributor list configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContributorsConfig {
    /// Whether the home page fetches the contributor list.
    pub enabled: bool,
    /// Endpoint returning a JSON array of `{login, gravatar_id}` objects.
    pub url: String,
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ContributorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_CONTRIBUTORS_URL.to_owned(),
            timeout_secs: 10,
        }
    }
}

/// HTTP caching configuration (production only).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// `max-age` directive in seconds.
    pub max_age: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_age: 300 }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`contributors.url`").
        field: String,
        /// Error message (e.g., "${`API_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `recipes.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(root) = &settings.content_root {
            self.content_resolved.root.clone_from(root);
        }
        if let Some(environment) = settings.environment {
            self.server.environment = environment;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            contributors: ContributorsConfig::default(),
            cache: CacheConfig::default(),
            content_resolved: ContentConfig {
                root: base.to_path_buf(),
                public_dir: base.join("public"),
                ignored_dirs: default_ignored_dirs(),
                ignore_match: IgnoreMatch::default(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_contributors()?;
        self.validate_cache()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_contributors(&self) -> Result<(), ConfigError> {
        if !self.contributors.enabled {
            return Ok(());
        }
        require_non_empty(&self.contributors.url, "contributors.url")?;
        require_http_url(&self.contributors.url, "contributors.url")?;
        if self.contributors.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "contributors.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_cache(&self) -> Result<(), ConfigError> {
        if self.cache.max_age > MAX_CACHE_AGE {
            return Err(ConfigError::Validation(format!(
                "cache.max_age cannot exceed {MAX_CACHE_AGE}"
            )));
        }
        Ok(())
    }

    /// Expand `${VAR}` references from the process environment.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.expand_vars(|name| std::env::var(name).ok())
    }

    /// Expand `${VAR}` references in the fields that accept them.
    fn expand_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        for (field, value) in [
            ("server.host", &mut self.server.host),
            ("contributors.url", &mut self.contributors.url),
        ] {
            if !value.contains("${") {
                continue;
            }
            *value = shellexpand::env_with_context(value.as_str(), |name| {
                lookup(name).map(Some).ok_or(std::env::VarError::NotPresent)
            })
            .map(Cow::into_owned)
            .map_err(|e| ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} not set", e.var_name),
            })?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            root: resolve(self.content.root.as_deref(), "."),
            public_dir: resolve(self.content.public_dir.as_deref(), "public"),
            ignored_dirs: self
                .content
                .ignored_dirs
                .clone()
                .unwrap_or_else(default_ignored_dirs),
            ignore_match: self.content.ignore_match.unwrap_or_default(),
        };
    }
}

fn default_ignored_dirs() -> Vec<String> {
    DEFAULT_IGNORED_DIRS.iter().map(|s| (*s).to_owned()).collect()
}
