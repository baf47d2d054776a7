//! Domain layer containing the short code registry and its entities.
//!
//! The domain layer has no dependency on HTTP or on telemetry. It owns all
//! mutable state of the service.
//!
//! # Modules
//!
//! - [`entities`] - [`UrlRecord`] and [`ClickEvent`]
//! - [`registry`] - The in-memory code → record mapping with expiry and click accounting
//! - [`clock`] - Time source seam for deterministic expiry
//! - [`sweeper`] - Periodic eviction of expired records
//! - [`error`] - [`RegistryError`]
//!
//! # Request Flow
//!
//! 1. HTTP handler calls [`crate::application::services::LinkService`]
//! 2. The service validates input and calls the [`Registry`]
//! 3. The registry checks expiry, mutates under its lock, and returns a snapshot
//! 4. Telemetry is emitted by the service after the lock is released

pub mod clock;
pub mod entities;
pub mod error;
pub mod registry;
pub mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::{ClickEvent, UrlRecord};
pub use error::RegistryError;
pub use registry::Registry;
