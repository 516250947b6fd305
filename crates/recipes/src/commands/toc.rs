//! `recipes toc` command implementation.
//!
//! Prints the topic menu and table of contents as JSON, the same data the
//! server puts in every page.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use recipes_config::{CliSettings, Config};
use recipes_site::{ContentIndex, IgnoreSet, TableOfContents};
use recipes_storage_fs::FsContentTree;
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Path to configuration file (default: auto-discover recipes.toml).
    #[arg(short, long, env = "RECIPES_CONFIG")]
    config: Option<PathBuf>,

    /// Content root directory (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,
}

/// JSON document printed by the command.
#[derive(Debug, Serialize)]
struct TocReport {
    menu: Vec<String>,
    toc: TableOfContents,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            content_root: self.root,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let report = build_report(&config);
        tracing::info!(topics = report.menu.len(), "Indexed content root");

        Output::new().data(&serde_json::to_string_pretty(&report)?)?;
        Ok(())
    }
}

fn build_report(config: &Config) -> TocReport {
    let content = &config.content_resolved;
    let tree = Arc::new(FsContentTree::new(content.root.clone()));
    let ignore = IgnoreSet::new(&content.ignored_dirs, content.ignore_match);
    let index = ContentIndex::new(tree, ignore);

    TocReport {
        menu: index.list_topics(),
        toc: index.table_of_contents(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("README.md"), "# Recipes").unwrap();
        fs::create_dir(root.join("routing")).unwrap();
        fs::write(root.join("routing").join("README.md"), "").unwrap();
        fs::write(root.join("routing").join("filters.md"), "").unwrap();
        fs::create_dir(root.join("tmp")).unwrap();
        let config_path = root.join("recipes.toml");
        fs::write(&config_path, "").unwrap();

        let config = Config::load(Some(config_path.as_path()), None).unwrap();
        let report = build_report(&config);

        assert_eq!(report.menu, vec!["routing"]);
        assert_eq!(report.toc["routing"], vec!["filters"]);

        let json = serde_json::to_value(&TocReport {
            menu: report.menu,
            toc: report.toc,
        })
        .unwrap();
        assert_eq!(json["toc"]["routing"][0], "filters");
    }
}
