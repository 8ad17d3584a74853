use points_watcher::config::{self, ConfigError, ObservabilityConfig};
use points_watcher::lifecycle;
use points_watcher::observability::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = config::load_from_process_env();

    let filter = match &loaded {
        Ok(config) => config.observability.log_filter.clone(),
        Err(_) => ObservabilityConfig::default().log_filter,
    };
    init_logging(&filter);

    tracing::info!("points-watcher v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            if let ConfigError::MissingCredential(_) = e {
                tracing::error!("Make sure TWITCH_USERNAME and TWITCH_PASSWORD are set");
            }
            return Err(e.into());
        }
    };

    if let Err(e) = lifecycle::run(config).await {
        tracing::error!(error = %e, "Watcher stopped with an error");
        return Err(e.into());
    }

    Ok(())
}
