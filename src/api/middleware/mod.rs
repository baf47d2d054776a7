//! HTTP middleware for request processing.
//!
//! Provides access logging and the CORS policy.

pub mod cors;
pub mod tracing;
