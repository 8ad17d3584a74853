//! Miner engine running as a supervised child process.
//!
//! # Responsibilities
//! - Hold credentials and the explicit engine configuration
//! - Launch the miner program with its settings serialized as JSON
//! - Restart the miner when the active streamer list is swapped
//! - Stop the miner on shutdown
//!
//! # Child Environment
//! - `TWITCH_USERNAME` / `TWITCH_PASSWORD`: account credentials
//! - `MINER_SETTINGS`: JSON document with `settings`, `logger`, `analytics`
//!   and `streamers`

use serde::Serialize;
use std::fs;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use thiserror::Error;
use tokio::process::{Child, Command};

use crate::config::loader::{ENV_PASSWORD, ENV_USERNAME};
use crate::config::{AnalyticsSettings, Credentials, EngineConfig, LoggerSettings, MinerSettings};
use crate::engine::{ActiveStreamers, MinerEngine};
use crate::lifecycle::ShutdownSignal;
use crate::streamers::StreamerList;

pub const ENV_MINER_SETTINGS: &str = "MINER_SETTINGS";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine command is empty")]
    EmptyCommand,

    #[error("failed to create analytics directory: {0}")]
    AnalyticsDir(#[source] std::io::Error),

    #[error("failed to serialize miner settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("failed to start miner: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("failed waiting on miner: {0}")]
    Wait(#[source] std::io::Error),

    #[error("miner exited with {0}")]
    Exited(ExitStatus),
}

#[derive(Serialize)]
struct MinerLaunch<'a> {
    settings: &'a MinerSettings,
    logger: &'a LoggerSettings,
    analytics: Option<&'a AnalyticsSettings>,
    streamers: &'a StreamerList,
}

pub struct SupervisedEngine {
    credentials: Credentials,
    config: EngineConfig,
    analytics: Option<AnalyticsSettings>,
    active: ActiveStreamers,
}

impl SupervisedEngine {
    pub fn new(credentials: Credentials, config: EngineConfig) -> Self {
        Self {
            credentials,
            config,
            analytics: None,
            active: ActiveStreamers::default(),
        }
    }

    /// Configure the miner's analytics server. Ignored by the miner when
    /// `settings.enable_analytics` is off.
    pub fn analytics(&mut self, settings: AnalyticsSettings) -> Result<(), EngineError> {
        if self.config.settings.enable_analytics {
            fs::create_dir_all(&self.config.settings.analytics_path)
                .map_err(EngineError::AnalyticsDir)?;
        }
        tracing::info!(
            host = %settings.host,
            port = settings.port,
            refresh_minutes = settings.refresh_minutes,
            days_ago = settings.days_ago,
            "Analytics server configured"
        );
        self.analytics = Some(settings);
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Serialized `MINER_SETTINGS` document for `streamers`.
    pub fn launch_document(&self, streamers: &StreamerList) -> Result<String, EngineError> {
        let launch = MinerLaunch {
            settings: &self.config.settings,
            logger: &self.config.logger,
            analytics: self.analytics.as_ref(),
            streamers,
        };
        Ok(serde_json::to_string(&launch)?)
    }

    fn spawn(&self, streamers: &StreamerList) -> Result<Child, EngineError> {
        let (program, args) = self
            .config
            .command
            .split_first()
            .ok_or(EngineError::EmptyCommand)?;

        let child = Command::new(program)
            .args(args)
            .env(ENV_USERNAME, &self.credentials.username)
            .env(ENV_PASSWORD, &self.credentials.password)
            .env(ENV_MINER_SETTINGS, self.launch_document(streamers)?)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(EngineError::Spawn)?;

        tracing::info!(pid = ?child.id(), streamers = %streamers, "Miner started");
        Ok(child)
    }

    /// Run the miner on `streamers` until shutdown or until the miner exits
    /// on its own. A swapped list restarts the miner.
    pub async fn run(
        &self,
        streamers: StreamerList,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), EngineError> {
        let mut current = Arc::new(streamers);
        self.active.activate(current.clone());

        let result = 'supervise: loop {
            if shutdown.is_triggered() {
                tracing::info!("Shutdown already requested, not starting miner");
                break Ok(());
            }

            let mut child = match self.spawn(&current) {
                Ok(child) => child,
                Err(e) => break Err(e),
            };

            loop {
                tokio::select! {
                    status = child.wait() => {
                        break 'supervise match status {
                            Ok(status) if status.success() => {
                                tracing::info!(%status, "Miner exited");
                                Ok(())
                            }
                            Ok(status) => Err(EngineError::Exited(status)),
                            Err(e) => Err(EngineError::Wait(e)),
                        };
                    }
                    _ = self.active.changed() => {
                        let Some(latest) = self.active.load() else { continue };
                        // Permit left by a store that was already picked up.
                        if Arc::ptr_eq(&latest, &current) {
                            continue;
                        }
                        stop(&mut child).await;
                        current = latest;
                        tracing::info!(streamers = %current, "Restarting miner with updated streamer list");
                        break;
                    }
                    _ = shutdown.recv() => {
                        tracing::info!("Stopping miner");
                        stop(&mut child).await;
                        break 'supervise Ok(());
                    }
                }
            }
        };

        self.active.clear();
        result
    }
}

async fn stop(child: &mut Child) {
    if let Err(e) = child.kill().await {
        tracing::debug!(error = %e, "Failed to kill miner process");
    }
}

impl MinerEngine for SupervisedEngine {
    fn streamers(&self) -> Option<Arc<StreamerList>> {
        self.active.load()
    }

    fn set_streamer_list(&self, list: Arc<StreamerList>) {
        self.active.store(list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use crate::streamers::StreamerId;
    use std::time::Duration;

    fn credentials() -> Credentials {
        Credentials {
            username: "viewer".into(),
            password: "secret".into(),
        }
    }

    fn list(names: &[&str]) -> StreamerList {
        names.iter().map(|n| StreamerId::parse(n).unwrap()).collect()
    }

    fn engine(script: &str) -> SupervisedEngine {
        let config = EngineConfig {
            command: vec!["sh".into(), "-c".into(), script.into()],
            ..Default::default()
        };
        SupervisedEngine::new(credentials(), config)
    }

    #[test]
    fn test_launch_document_carries_settings() {
        let engine = engine("true");
        let doc = engine.launch_document(&list(&["a", "b"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc).unwrap();

        assert_eq!(value["streamers"], serde_json::json!(["a", "b"]));
        assert_eq!(value["settings"]["check_interval_secs"], 30);
        assert_eq!(value["settings"]["make_predictions"], false);
        assert_eq!(value["logger"]["console_level"], 10);
        assert!(value["analytics"].is_null());
        assert!(!doc.contains("secret"));
    }

    #[test]
    fn test_analytics_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut engine = engine("true");
        engine.config.settings.analytics_path = dir.path().join("analytics");

        engine.analytics(AnalyticsSettings::default()).unwrap();

        assert!(dir.path().join("analytics").is_dir());
        let doc = engine.launch_document(&list(&["a"])).unwrap();
        assert!(doc.contains("\"days_ago\":30"));
    }

    #[tokio::test]
    async fn test_empty_command_is_an_error() {
        let engine = SupervisedEngine::new(
            credentials(),
            EngineConfig {
                command: Vec::new(),
                ..Default::default()
            },
        );
        let shutdown = Shutdown::new();
        let err = engine.run(list(&["a"]), shutdown.subscribe()).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyCommand));
        assert!(engine.streamers().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_reported() {
        let shutdown = Shutdown::new();

        let ok = engine("exit 0").run(list(&["a"]), shutdown.subscribe()).await;
        assert!(ok.is_ok());

        let failed = engine("exit 3").run(list(&["a"]), shutdown.subscribe()).await;
        assert!(matches!(failed, Err(EngineError::Exited(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shutdown_stops_miner() {
        let engine = Arc::new(engine("sleep 30"));
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();

        let runner = engine.clone();
        let handle = tokio::spawn(async move { runner.run(list(&["a"]), rx).await });

        wait_until(|| engine.streamers().is_some()).await;
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("engine stops promptly")
            .unwrap();
        assert!(result.is_ok());
        assert!(engine.streamers().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_swap_restarts_miner_with_new_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("launches.txt");
        let script = format!(
            "printf '%s\\n' \"$MINER_SETTINGS\" >> '{}'; sleep 30",
            out.display()
        );
        let engine = Arc::new(engine(&script));
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();

        let runner = engine.clone();
        let handle = tokio::spawn(async move { runner.run(list(&["a"]), rx).await });

        let launches = || fs::read_to_string(&out).unwrap_or_default();
        wait_until(|| launches().lines().count() == 1).await;

        engine.set_streamer_list(Arc::new(list(&["b", "a"])));
        wait_until(|| launches().lines().count() == 2).await;

        let text = launches();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains(r#""streamers":["a"]"#));
        assert!(lines[1].contains(r#""streamers":["b","a"]"#));

        shutdown.trigger();
        assert!(handle.await.unwrap().is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shutdown_before_run_is_not_lost() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("started");
        let engine = engine(&format!("touch '{}'; sleep 30", marker.display()));

        let shutdown = Shutdown::new();
        shutdown.trigger();

        let result = tokio::time::timeout(
            Duration::from_secs(3),
            engine.run(list(&["a"]), shutdown.subscribe()),
        )
        .await
        .expect("engine honours a shutdown requested before it subscribed");
        assert!(result.is_ok());
        assert!(!marker.exists());
        assert!(engine.streamers().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_storing_current_list_again_does_not_restart() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("launches.txt");
        let script = format!("echo started >> '{}'; sleep 30", out.display());
        let engine = Arc::new(engine(&script));
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();

        let runner = engine.clone();
        let handle = tokio::spawn(async move { runner.run(list(&["a"]), rx).await });

        let launches = || fs::read_to_string(&out).unwrap_or_default().lines().count();
        wait_until(|| launches() == 1).await;

        let current = engine.streamers().unwrap();
        engine.set_streamer_list(current);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(launches(), 1);

        engine.set_streamer_list(Arc::new(list(&["b"])));
        wait_until(|| launches() == 2).await;

        shutdown.trigger();
        assert!(handle.await.unwrap().is_ok());
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        for _ in 0..100 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("condition not met in time");
    }
}
