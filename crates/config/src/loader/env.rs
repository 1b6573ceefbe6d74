//! Environment variable parsing for container construction.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - An unknown format name returns ConfigError::InvalidValue.

use std::path::PathBuf;

use super::builder::ContainerBuilder;
use super::error::ConfigError;
use super::format::ConfigFormat;
use crate::constants::{ENV_CONFIG_FORMAT, ENV_CONFIG_PATH, ENV_ENVIRONMENT};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the builder.
pub fn apply_env(builder: &mut ContainerBuilder) -> Result<(), ConfigError> {
    if let Some(environment) = env_var_or_none(ENV_ENVIRONMENT) {
        builder.set_environment(Some(environment));
    }
    if let Some(path) = env_var_or_none(ENV_CONFIG_PATH) {
        builder.set_config_path(Some(PathBuf::from(path)));
    }
    if let Some(format) = env_var_or_none(ENV_CONFIG_FORMAT) {
        let parsed = ConfigFormat::from_name(&format).ok_or_else(|| ConfigError::InvalidValue {
            var: ENV_CONFIG_FORMAT.to_string(),
            message: format!("must be json or yaml (got {format})"),
        })?;
        builder.set_format(Some(parsed));
    }
    Ok(())
}
