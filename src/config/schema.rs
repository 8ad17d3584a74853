//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the watcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root configuration for the watcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatcherConfig {
    /// Streamer list source and polling.
    pub streamers: StreamersConfig,

    /// Log retention sweeping.
    pub retention: RetentionConfig,

    /// Health endpoint listener.
    pub health: HealthConfig,

    /// Miner engine settings.
    pub engine: EngineConfig,

    /// Analytics server started by the miner.
    pub analytics: AnalyticsSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Account credentials. Only ever read from the environment.
    #[serde(skip)]
    pub credentials: Option<Credentials>,
}

/// Streamer list configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StreamersConfig {
    /// Path to the comma-separated streamer file.
    pub csv_path: PathBuf,

    /// Streamer used when the file is missing or has no valid entries.
    pub default_streamer: String,

    /// Interval between modification-time checks, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for StreamersConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("streamers.csv"),
            default_streamer: "mixwell".to_string(),
            poll_interval_secs: 300,
        }
    }
}

/// Log retention configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Directory scanned for `*.log` files.
    pub directory: PathBuf,

    /// Total size above which every log file is deleted.
    pub threshold_bytes: u64,

    /// Interval between sweeps, in seconds.
    pub interval_secs: u64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            threshold_bytes: 20 * 1024 * 1024,
            interval_secs: 300,
        }
    }
}

/// Health endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Bind host.
    pub host: String,

    /// Bind port. Overridden by `PORT`.
    pub port: u16,
}

impl HealthConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Everything the miner engine is constructed with, apart from credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Program and arguments that start the miner.
    pub command: Vec<String>,

    /// Miner behaviour toggles.
    pub settings: MinerSettings,

    /// Miner logger configuration.
    pub logger: LoggerSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: vec!["python3".to_string(), "miner.py".to_string()],
            settings: MinerSettings::default(),
            logger: LoggerSettings::default(),
        }
    }
}

/// Miner behaviour toggles.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MinerSettings {
    pub check_interval_secs: u64,
    pub make_predictions: bool,
    pub follow_raid: bool,
    pub claim_drops: bool,
    pub watch_streak: bool,
    pub auto_claim_bonuses: bool,
    pub disable_ssl_cert_verification: bool,
    pub enable_analytics: bool,
    pub chat_online: bool,

    /// Directory where the miner writes analytics data.
    pub analytics_path: PathBuf,
}

impl Default for MinerSettings {
    fn default() -> Self {
        Self {
            check_interval_secs: 30,
            make_predictions: false,
            follow_raid: true,
            claim_drops: true,
            watch_streak: true,
            auto_claim_bonuses: true,
            disable_ssl_cert_verification: true,
            enable_analytics: true,
            chat_online: false,
            analytics_path: PathBuf::from("analytics"),
        }
    }
}

/// Miner logger configuration. Levels use the miner's numeric scale
/// (10 = debug, 30 = warning).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub save: bool,
    pub less: bool,
    pub console_level: u8,
    pub file_level: u8,
    pub emoji: bool,
    pub colored: bool,
    pub auto_clear: bool,
    pub console_username: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            save: false,
            less: false,
            console_level: 10,
            file_level: 30,
            emoji: true,
            colored: true,
            auto_clear: true,
            console_username: true,
        }
    }
}

/// Analytics server settings handed to the miner.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub host: String,

    /// Overridden by `ANALYTICS_PORT`.
    pub port: u16,

    /// Dashboard refresh interval, in minutes.
    pub refresh_minutes: u32,

    /// How many days of history the dashboard shows.
    pub days_ago: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            refresh_minutes: 5,
            days_ago: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "points_watcher=debug".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Twitch account credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: WatcherConfig = toml::from_str(
            r#"
            [streamers]
            default_streamer = "someone"

            [retention]
            threshold_bytes = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.streamers.default_streamer, "someone");
        assert_eq!(config.streamers.poll_interval_secs, 300);
        assert_eq!(config.retention.threshold_bytes, 1024);
        assert_eq!(config.health.port, 8080);
        assert_eq!(config.engine.settings.check_interval_secs, 30);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            username: "viewer".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{:?}", creds);
        assert!(printed.contains("viewer"));
        assert!(!printed.contains("hunter2"));
    }
}
