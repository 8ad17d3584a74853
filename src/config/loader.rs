//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{Credentials, WatcherConfig};
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_CONFIG_PATH: &str = "WATCHER_CONFIG";
pub const ENV_PORT: &str = "PORT";
pub const ENV_ANALYTICS_PORT: &str = "ANALYTICS_PORT";
pub const ENV_USERNAME: &str = "TWITCH_USERNAME";
pub const ENV_PASSWORD: &str = "TWITCH_PASSWORD";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable {name} has invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Missing credential: {0} must be set")]
    MissingCredential(&'static str),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file, or defaults when no path is given.
/// The result is not validated; credentials are still unset.
pub fn load_file(path: Option<&Path>) -> Result<WatcherConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(WatcherConfig::default()),
    }
}

/// Overlay environment variables on top of a loaded configuration.
///
/// `lookup` abstracts `std::env::var` so tests can supply their own
/// environment. Empty values count as unset.
pub fn apply_env<F>(config: &mut WatcherConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = get(ENV_PORT) {
        config.health.port = parse_port(ENV_PORT, &port)?;
    }
    if let Some(port) = get(ENV_ANALYTICS_PORT) {
        config.analytics.port = parse_port(ENV_ANALYTICS_PORT, &port)?;
    }

    let username = get(ENV_USERNAME).ok_or(ConfigError::MissingCredential(ENV_USERNAME))?;
    let password = get(ENV_PASSWORD).ok_or(ConfigError::MissingCredential(ENV_PASSWORD))?;
    config.credentials = Some(Credentials { username, password });

    Ok(())
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}

/// Load, overlay and validate the full configuration.
pub fn load_config<F>(lookup: F) -> Result<WatcherConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = lookup(ENV_CONFIG_PATH).filter(|p| !p.is_empty());
    let mut config = load_file(path.as_deref().map(Path::new))?;
    apply_env(&mut config, &lookup)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration from the process environment.
pub fn load_from_process_env() -> Result<WatcherConfig, ConfigError> {
    load_config(|name| std::env::var(name).ok())
}
