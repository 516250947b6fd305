//! `recipes serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use recipes_config::{CliSettings, Config, Environment};
use recipes_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover recipes.toml).
    #[arg(short, long, env = "RECIPES_CONFIG")]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Run in production mode (send caching headers).
    #[arg(long)]
    production: bool,

    /// Enable verbose output (request and startup logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            content_root: self.root,
            environment: self.production.then_some(Environment::Production),
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Content root: {}",
            config.content_resolved.root.display()
        ));
        if !config.content_resolved.root.is_dir() {
            output.warning("Content root does not exist, the topic menu will be empty");
        }
        output.info(&format!(
            "Public directory: {}",
            config.content_resolved.public_dir.display()
        ));

        if config.contributors.enabled {
            output.info(&format!("Contributors: {}", config.contributors.url));
        } else {
            output.info("Contributors: disabled");
        }

        if config.server.environment.is_production() {
            output.highlight(&format!(
                "Production mode: caching headers enabled (max-age={})",
                config.cache.max_age
            ));
        }

        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
