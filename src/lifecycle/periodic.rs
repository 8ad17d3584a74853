//! Periodic background tasks.
//!
//! A task only knows how to do one tick. `run_periodic` owns the timer and
//! the shutdown subscription, so tests can call a task's tick directly
//! without waiting on a clock.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::lifecycle::ShutdownSignal;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("blocking work failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait PeriodicTask: Send {
    fn name(&self) -> &'static str;

    fn tick(&mut self) -> impl Future<Output = Result<(), TaskError>> + Send;
}

/// Run `task` every `period` until shutdown fires. The first tick happens one
/// full period after start. Tick errors are logged and never end the loop.
pub async fn run_periodic<T>(mut task: T, period: Duration, mut shutdown: ShutdownSignal)
where
    T: PeriodicTask,
{
    tracing::info!(task = task.name(), interval = ?period, "Periodic task starting");

    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = task.tick().await {
                    tracing::error!(task = task.name(), error = %e, "Periodic task tick failed");
                }
            }
            _ = shutdown.recv() => {
                tracing::info!(task = task.name(), "Periodic task received shutdown signal, exiting loop");
                break;
            }
        }
    }
}
