//! Best-effort telemetry to an external log collector.
//!
//! Provides a [`LogSink`] trait with two implementations:
//! - [`HttpLogSink`] - Remote collector over HTTP with Bearer auth
//! - [`NullLogSink`] - No-op implementation for disabled telemetry
//!
//! Entries are queued through [`TelemetryHandle`] and delivered by
//! [`run_telemetry_worker`], never inline with a request.

mod entry;
mod http_sink;
mod null_sink;
mod sink;
mod worker;

pub use entry::{Level, LogEntry, Package, Stack};
pub use http_sink::HttpLogSink;
pub use null_sink::NullLogSink;
pub use sink::{LogSink, LoggingError};
pub use worker::{TelemetryHandle, run_telemetry_worker};
