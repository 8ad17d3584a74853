//! Log retention subsystem.
//!
//! # Design Decisions
//! - Size-triggered, all-or-nothing: once the `*.log` files together exceed
//!   the threshold, every one of them is deleted
//! - No rotation and no truncation
//! - Unreadable files and failed deletions are skipped, never fatal

pub mod sweeper;

pub use sweeper::{LogSweeper, SweepReport};
