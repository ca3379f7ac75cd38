//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::HolaConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file.
///
/// The result still needs the environment overlay applied; see
/// [`crate::config::env::apply_env`].
pub fn load_config(path: &Path) -> Result<HolaConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: HolaConfig = toml::from_str(&content)?;
    Ok(config)
}
