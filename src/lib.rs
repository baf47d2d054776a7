//! # Expiring Shortener
//!
//! An in-memory URL shortening service built with Axum. Clients submit a long
//! URL and receive a short code that redirects to it until it expires; every
//! redirect is recorded as a click with its user agent and referrer.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::Registry`] that owns all records,
//!   enforces code uniqueness and expiry, and records clicks
//! - **Application Layer** ([`application`]) - Request validation and telemetry around the registry
//! - **Infrastructure Layer** ([`infrastructure`]) - Best-effort telemetry to a remote log collector
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Custom or generated short codes, unique among live links
//! - Per-link validity window; expired codes answer `410 Gone` and become reusable
//! - Click history (timestamp, user agent, referrer) per link
//! - Background expiry sweep and fire-and-forget telemetry
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:5000"
//! cargo run
//!
//! curl -X POST localhost:5000/shorturls \
//!      -H 'content-type: application/json' \
//!      -d '{"url":"https://example.com","validity":10}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, ValidityPolicy};
    pub use crate::domain::{ClickEvent, ManualClock, Registry, RegistryError, UrlRecord};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
