//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Sweep logs → Build engine → Load streamers → Start background tasks
//!     → Run engine (main task)
//!
//! Background (periodic.rs):
//!     Interval tick → task.tick() → log errors, keep going
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → latch → engine stops miner, tasks exit → exit 0
//! ```
//!
//! # Design Decisions
//! - Fail fast only on configuration; everything after that recovers locally
//! - Every background loop holds its own shutdown subscription
//! - Shutdown latches, so subscribing late never misses it

pub mod periodic;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use periodic::{run_periodic, PeriodicTask, TaskError};
pub use shutdown::{Shutdown, ShutdownSignal};
pub use startup::{run, StartupError};
