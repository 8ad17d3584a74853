//! Liveness endpoint for the hosting platform.
//!
//! # Design Decisions
//! - One route, `GET /health`, always `200 OK` while the process runs
//! - Everything else falls through to axum's default 404
//! - No access-log layer: the platform probes constantly

pub mod server;

pub use server::{health_router, HealthServer, HEALTH_PATH};
