//! Miner engine subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     SupervisedEngine::new(credentials, EngineConfig)
//!     → analytics(AnalyticsSettings)
//!     → run(initial list, shutdown)   (occupies the main task)
//!
//! hot reload:
//!     reconciler → MinerEngine::set_streamer_list
//!     → active.rs (atomic swap + notify)
//!     → supervised.rs restarts the miner process with the new list
//! ```
//!
//! # Design Decisions
//! - The miner itself is an external program; this crate never talks to Twitch
//! - Settings are an explicit value handed to the engine, not global state
//! - The active list is swapped wholesale, never patched

pub mod active;
pub mod supervised;

use std::sync::Arc;

use crate::streamers::StreamerList;

pub use active::ActiveStreamers;
pub use supervised::{EngineError, SupervisedEngine};

/// The part of the engine the hot-reload path talks to.
pub trait MinerEngine: Send + Sync {
    /// The list the engine is working through, or `None` before it runs.
    fn streamers(&self) -> Option<Arc<StreamerList>>;

    /// Atomically replace the active list. Readers observe either the old
    /// list or the new one, never a mix.
    fn set_streamer_list(&self, list: Arc<StreamerList>);
}
