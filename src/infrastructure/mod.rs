//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`telemetry`] - Fire-and-forget delivery of log entries to a remote collector

pub mod telemetry;
