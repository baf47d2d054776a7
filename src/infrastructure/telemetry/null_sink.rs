//! No-op log sink for disabled telemetry.

use async_trait::async_trait;
use tracing::debug;

use super::entry::LogEntry;
use super::sink::{LogSink, LoggingError};

/// A sink that accepts and discards every entry.
///
/// Used when `TELEMETRY_URL` is not configured and in tests.
pub struct NullLogSink;

impl NullLogSink {
    pub fn new() -> Self {
        debug!("Using NullLogSink (telemetry disabled)");
        Self
    }
}

impl Default for NullLogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSink for NullLogSink {
    async fn log(&self, _entry: &LogEntry) -> Result<(), LoggingError> {
        Ok(())
    }
}
