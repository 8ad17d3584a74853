//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, non-empty command)
//! - Check the fallback streamer is itself a valid identifier
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::WatcherConfig;
use crate::streamers::StreamerId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("default streamer {0:?} is not a valid identifier")]
    InvalidDefaultStreamer(String),

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("engine command must not be empty")]
    EmptyEngineCommand,

    #[error("credentials are not set")]
    MissingCredentials,
}

pub fn validate_config(config: &WatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if StreamerId::parse(&config.streamers.default_streamer).is_err() {
        errors.push(ValidationError::InvalidDefaultStreamer(
            config.streamers.default_streamer.clone(),
        ));
    }
    if config.streamers.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval("streamers.poll_interval_secs"));
    }
    if config.retention.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval("retention.interval_secs"));
    }
    if config.engine.settings.check_interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval("engine.settings.check_interval_secs"));
    }
    if config.engine.command.is_empty() {
        errors.push(ValidationError::EmptyEngineCommand);
    }
    if config.credentials.is_none() {
        errors.push(ValidationError::MissingCredentials);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
