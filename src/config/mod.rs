//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (WATCHER_CONFIG)
//!     → loader.rs (parse & deserialize, defaults for everything)
//!     → loader.rs (environment overlay: PORT, credentials)
//!     → validation.rs (semantic checks)
//!     → WatcherConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the watcher runs with no file at all
//! - Credentials only come from the environment and are never serialized
//! - Missing credentials are fatal; nothing else about startup is

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_process_env, ConfigError};
pub use schema::{
    AnalyticsSettings, Credentials, EngineConfig, HealthConfig, LoggerSettings, MinerSettings,
    ObservabilityConfig, RetentionConfig, StreamersConfig, WatcherConfig,
};
