//! CLI Tooling
//!
//! Command-line interface for the reconciliation pipeline. Every command
//! loads catalog files, runs the engine in memory, and renders text or JSON
//! output; nothing here mutates its inputs.

use crate::catalog;
use crate::config::{ConfigLoader, ResconConfig};
use crate::error::CatalogError;
use crate::report;
use crate::tree::merge::merge_forests;
use crate::tree::paths::flatten_paths;
use crate::tree::verify::verify_merge;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Rescon CLI - deterministic reconciliation of resource catalogs
#[derive(Parser)]
#[command(name = "rescon")]
#[command(about = "Deterministic reconciliation of hierarchical resource catalogs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge two catalog files into one canonical tree
    Merge {
        /// First catalog (overridden on identifier collision)
        first: PathBuf,
        /// Second catalog (authoritative on identifier collision)
        second: PathBuf,
        /// Output file for the merged forest
        #[arg(long, default_value = "merged_resources.json")]
        output: PathBuf,
        /// Also write the flattened path map to this file
        #[arg(long)]
        map: Option<PathBuf>,
        /// Run the integrity audit after merging
        #[arg(long)]
        verify: bool,
    },
    /// Flatten a merged catalog into a path-keyed lookup table
    Map {
        /// Merged catalog file
        input: PathBuf,
        /// Output file for the lookup table
        #[arg(long, default_value = "id_map.json")]
        output: PathBuf,
    },
    /// Audit a merged catalog against its two sources
    Verify {
        /// First catalog
        first: PathBuf,
        /// Second catalog
        second: PathBuf,
        /// Merged catalog to audit
        merged: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print a merged catalog as an indented tree with sort keys
    Show {
        /// Merged catalog file
        input: PathBuf,
        /// Root subtrees to print (0 = all; default from config)
        #[arg(long)]
        roots: Option<usize>,
    },
}

/// Execution context carrying the resolved configuration.
pub struct CliContext {
    config: ResconConfig,
}

impl CliContext {
    /// Resolve configuration from an explicit file or the standard sources.
    pub fn new(config_file: Option<PathBuf>) -> Result<Self, CatalogError> {
        let config = match config_file {
            Some(path) => ConfigLoader::load_from_file(&path),
            None => ConfigLoader::load(),
        }
        .map_err(|e| CatalogError::Config(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ResconConfig {
        &self.config
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, CatalogError> {
        match command {
            Commands::Merge {
                first,
                second,
                output,
                map,
                verify,
            } => self.run_merge(first, second, output, map.as_deref(), *verify),
            Commands::Map { input, output } => self.run_map(input, output),
            Commands::Verify {
                first,
                second,
                merged,
                format,
            } => self.run_verify(first, second, merged, format),
            Commands::Show { input, roots } => self.run_show(input, *roots),
        }
    }

    fn run_merge(
        &self,
        first_path: &Path,
        second_path: &Path,
        output: &Path,
        map: Option<&Path>,
        verify: bool,
    ) -> Result<String, CatalogError> {
        let first = catalog::load_forest(first_path)?;
        let second = catalog::load_forest(second_path)?;

        let outcome = merge_forests(&first, &second);
        catalog::save_forest(output, &outcome.forest)?;
        info!(output = %output.display(), "merged catalog written");

        if let Some(map_path) = map {
            let entries = flatten_paths(&outcome.forest, &self.config.pipeline.path_separator);
            catalog::save_path_map(map_path, &entries)?;
        }

        let mut out = report::format_merge_summary(&outcome);
        if verify {
            let report = verify_merge(&first, &second, &outcome.forest);
            out.push_str("\n");
            out.push_str(&report::format_integrity_text(&report));
        }
        Ok(out)
    }

    fn run_map(&self, input: &Path, output: &Path) -> Result<String, CatalogError> {
        let forest = catalog::load_forest(input)?;
        let entries = flatten_paths(&forest, &self.config.pipeline.path_separator);
        catalog::save_path_map(output, &entries)?;
        Ok(format!(
            "Wrote {} path entries to {}\n",
            entries.len(),
            output.display()
        ))
    }

    fn run_verify(
        &self,
        first_path: &Path,
        second_path: &Path,
        merged_path: &Path,
        format: &str,
    ) -> Result<String, CatalogError> {
        let first = catalog::load_forest(first_path)?;
        let second = catalog::load_forest(second_path)?;
        let merged = catalog::load_forest(merged_path)?;

        let report = verify_merge(&first, &second, &merged);

        if format == "json" {
            let rendered = json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "clean": report.is_clean(),
                "report": report,
            });
            serde_json::to_string_pretty(&rendered).map_err(|source| CatalogError::Parse {
                path: merged_path.to_path_buf(),
                source,
            })
        } else {
            Ok(report::format_integrity_text(&report))
        }
    }

    fn run_show(&self, input: &Path, roots: Option<usize>) -> Result<String, CatalogError> {
        let forest = catalog::load_forest(input)?;
        let max_roots = roots.unwrap_or(self.config.pipeline.preview_roots);
        Ok(report::format_tree_text(&forest, max_roots))
    }
}
