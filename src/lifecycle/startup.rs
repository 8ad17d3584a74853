//! Startup orchestration.
//!
//! # Responsibilities
//! - Clear oversized logs before anything writes new ones
//! - Build the engine from the validated configuration
//! - Load the initial streamer list
//! - Start the health endpoint, the streamer poller and the log sweeper
//! - Hand the main task to the engine until shutdown

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::WatcherConfig;
use crate::engine::{EngineError, SupervisedEngine};
use crate::health::HealthServer;
use crate::lifecycle::periodic::run_periodic;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::retention::{LogSweeper, SweepReport};
use crate::streamers::{load_streamers, InvalidStreamerId, StreamerId, StreamerPoller};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("credentials are not configured")]
    MissingCredentials,

    #[error("default streamer: {0}")]
    DefaultStreamer(#[from] InvalidStreamerId),

    #[error("failed to bind health endpoint on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("blocking startup work failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub async fn run(config: WatcherConfig) -> Result<(), StartupError> {
    let credentials = config
        .credentials
        .clone()
        .ok_or(StartupError::MissingCredentials)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let sweeper = LogSweeper::new(
        config.retention.directory.clone(),
        config.retention.threshold_bytes,
    );
    initial_sweep(&sweeper).await?;

    tracing::info!(username = %credentials.username, "Starting points watcher");

    let mut engine = SupervisedEngine::new(credentials, config.engine.clone());
    engine.analytics(config.analytics.clone())?;
    let engine = Arc::new(engine);

    let default = StreamerId::parse(&config.streamers.default_streamer)?;
    let csv_path = config.streamers.csv_path.clone();
    let streamers = {
        let (path, default) = (csv_path.clone(), default.clone());
        tokio::task::spawn_blocking(move || load_streamers(&path, &default)).await?
    };

    let shutdown = Shutdown::new();
    let engine_shutdown = shutdown.subscribe();
    spawn_signal_handler(shutdown.clone());

    let address = config.health.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(source) => return Err(StartupError::Bind { address, source }),
    };
    let health_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if let Err(e) = HealthServer::new().run(listener, health_shutdown).await {
            tracing::error!(error = %e, "Health endpoint failed");
        }
    });

    let poller = StreamerPoller::new(csv_path, default, engine.clone());
    tokio::spawn(run_periodic(
        poller,
        Duration::from_secs(config.streamers.poll_interval_secs),
        shutdown.subscribe(),
    ));
    tokio::spawn(run_periodic(
        sweeper,
        Duration::from_secs(config.retention.interval_secs),
        shutdown.subscribe(),
    ));

    tracing::info!(
        streamers = %streamers,
        check_interval_secs = config.engine.settings.check_interval_secs,
        analytics_enabled = config.engine.settings.enable_analytics,
        analytics_port = config.analytics.port,
        health_port = config.health.port,
        poll_interval_secs = config.streamers.poll_interval_secs,
        "Configuration complete, starting miner"
    );
    tracing::info!("If an activation code appears, enter it at https://www.twitch.tv/activate");

    let result = engine.run(streamers, engine_shutdown).await;

    // The miner may have stopped on its own; stop everything else too.
    shutdown.trigger();
    tracing::info!("Shutdown complete");

    result.map_err(StartupError::from)
}

/// Sweep once on the blocking pool before anything writes new logs.
async fn initial_sweep(sweeper: &LogSweeper) -> Result<SweepReport, StartupError> {
    let sweeper = sweeper.clone();
    Ok(tokio::task::spawn_blocking(move || sweeper.sweep()).await?)
}
