//! Layered configuration.
//!
//! Composition order, lowest to highest precedence: built-in defaults, an
//! optional `rescon.toml` in the working directory, then `RESCON`-prefixed
//! environment variables with `__` separating nested keys.

mod facade;
mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResconConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Options of the reconciliation pipeline itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Separator between segments in flattened lookup paths
    #[serde(default = "default_separator")]
    pub path_separator: String,

    /// Root subtrees printed by the show command before truncating
    #[serde(default = "default_preview_roots")]
    pub preview_roots: usize,
}

fn default_separator() -> String {
    "/".to_string()
}

fn default_preview_roots() -> usize {
    5
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            path_separator: default_separator(),
            preview_roots: default_preview_roots(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ResconConfig::default();
        assert_eq!(config.pipeline.path_separator, "/");
        assert_eq!(config.pipeline.preview_roots, 5);
        assert_eq!(config.logging.level, "info");
    }
}
