//! Recipes CLI - community recipes server.
//!
//! Provides commands for:
//! - `serve`: Start the recipes server
//! - `toc`: Print the topic menu and table of contents as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ServeArgs, TocArgs};
use error::CliError;
use output::Output;

/// Recipes - community contributed recipes and techniques.
#[derive(Parser)]
#[command(name = "recipes", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the recipes server.
    Serve(ServeArgs),
    /// Print the topic menu and table of contents as JSON.
    Toc(TocArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute())),
        Commands::Toc(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "recipes",
            "serve",
            "--root",
            "content",
            "--port",
            "9000",
            "--production",
            "-v",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Serve(ref args) if args.verbose));
    }

    #[test]
    fn test_parse_toc() {
        let cli = Cli::try_parse_from(["recipes", "toc", "--root", "content"]).unwrap();

        assert!(matches!(cli.command, Commands::Toc(_)));
    }
}
