//! Application layer services implementing business logic.
//!
//! Services validate requests, call into the [`crate::domain::Registry`], and
//! emit telemetry once the registry has returned.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and statistics

pub mod services;
