//! Configuration sources and merge order.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::Path;

/// Builder seeded with the built-in defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("pipeline.path_separator", "/")?
        .set_default("pipeline.preview_roots", 5)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.color", true)
}

/// Add the optional `rescon.toml` from the working directory.
pub fn add_working_dir_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(File::from(Path::new("rescon.toml")).required(false)))
}

/// Add a specific configuration file; missing file is an error here.
pub fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(File::from(path)))
}

/// Add environment variable overlay to builder.
/// Uses RESCON_ prefix and __ as separator for nested keys.
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("RESCON")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
