//! ConfigLoader facade over the layered sources.

use super::sources;
use super::ResconConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from the standard sources.
    /// Precedence: defaults (lowest) -> working-dir file -> environment (highest).
    pub fn load() -> Result<ResconConfig, ConfigError> {
        let builder = sources::builder_with_defaults()?;
        let builder = sources::add_working_dir_file(builder)?;
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ResconConfig, ConfigError> {
        let builder = sources::builder_with_defaults()?;
        let builder = sources::add_file(builder, path)?;
        let builder = sources::add_environment(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
