//! Channel points watcher.
//!
//! Keeps an external Twitch channel-points miner running against the
//! streamers listed in `streamers.csv`, hot-swapping the list when the file
//! changes, pruning oversized log files and answering platform health checks.

pub mod config;
pub mod engine;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod retention;
pub mod streamers;

pub use config::WatcherConfig;
pub use engine::{MinerEngine, SupervisedEngine};
pub use lifecycle::Shutdown;
pub use streamers::{StreamerId, StreamerList};
