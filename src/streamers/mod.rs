//! Streamer list subsystem.
//!
//! # Data Flow
//! ```text
//! streamers.csv
//!     → loader.rs (parse, validate, default fallback)
//!     → StreamerList (ordered, immutable)
//!     → engine at startup
//!
//! Every poll interval:
//!     poller.rs (mtime newer than watermark?)
//!     → loader.rs
//!     → reconcile.rs (equal? keep : swap whole list on the engine)
//! ```
//!
//! # Design Decisions
//! - Change detection is modification time only, no content hashing
//! - Invalid entries are dropped, never fatal
//! - Lists are replaced wholesale, never patched in place

pub mod identifier;
pub mod loader;
pub mod poller;
pub mod reconcile;

pub use identifier::{InvalidStreamerId, StreamerId, StreamerList};
pub use loader::{load_streamers, parse_streamers, preview_streamers, Preview};
pub use poller::{PollOutcome, StreamerPoller};
pub use reconcile::{reconcile, ReconcileOutcome};
