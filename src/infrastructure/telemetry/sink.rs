//! Log sink trait and error types.

use async_trait::async_trait;

use super::entry::LogEntry;

/// Errors that can occur while delivering a log entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log entry: {0}")]
    InvalidEntry(String),

    #[error("log collector rejected entry: {0}")]
    Rejected(String),

    #[error("no response from log collector: {0}")]
    Transport(String),
}

/// Destination for best-effort telemetry.
///
/// Callers never invoke a sink directly on a request path; entries go through
/// [`super::TelemetryHandle`] and are delivered by the background worker.
///
/// # Implementations
///
/// - [`super::HttpLogSink`] - POSTs entries to a remote log collector
/// - [`super::NullLogSink`] - Discards entries (telemetry disabled)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Delivers one entry.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::Rejected`] for a non-success response and
    /// [`LoggingError::Transport`] if the collector could not be reached.
    async fn log(&self, entry: &LogEntry) -> Result<(), LoggingError>;
}
