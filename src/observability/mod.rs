//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout (hosting platform log capture)
//!     → Metrics endpoint (Prometheus scrape, off by default)
//! ```

pub mod logging;
pub mod metrics;
