//! Fire-and-forget delivery of log entries.
//!
//! Request paths only ever call [`TelemetryHandle::emit`], which enqueues with
//! `try_send` and returns immediately. A single background worker drains the
//! queue and delivers entries with a short retry. Nothing here can fail or stall
//! the caller.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use super::entry::{Level, LogEntry, Package, Stack};
use super::sink::LogSink;

/// Delivery attempts after the first failure.
const RETRY_ATTEMPTS: usize = 2;

/// Cloneable sender side of the telemetry queue.
#[derive(Clone)]
pub struct TelemetryHandle {
    sender: mpsc::Sender<LogEntry>,
}

impl TelemetryHandle {
    /// Creates a handle and the receiver the worker should drain.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<LogEntry>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Enqueues `entry`, dropping it if the queue is full or closed.
    pub fn emit(&self, entry: LogEntry) {
        if let Err(e) = self.sender.try_send(entry) {
            metrics::counter!("telemetry_dropped_total").increment(1);
            debug!("Telemetry entry dropped: {}", e);
        }
    }

    /// Emits a backend entry; invalid entries are dropped.
    pub fn backend(&self, level: Level, package: Package, message: impl Into<String>) {
        match LogEntry::new(Stack::Backend, level, package, message) {
            Ok(entry) => self.emit(entry),
            Err(e) => debug!("Telemetry entry rejected: {}", e),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots left in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

/// Delivers queued entries to `sink` until every [`TelemetryHandle`] is dropped.
///
/// Each entry is retried with jittered exponential backoff; an entry that
/// still fails is logged locally and discarded.
pub async fn run_telemetry_worker(mut receiver: mpsc::Receiver<LogEntry>, sink: Arc<dyn LogSink>) {
    while let Some(entry) = receiver.recv().await {
        let strategy = ExponentialBackoff::from_millis(10)
            .map(jitter)
            .take(RETRY_ATTEMPTS);

        let result = Retry::spawn(strategy, || {
            let sink = sink.clone();
            let entry = entry.clone();
            async move { sink.log(&entry).await }
        })
        .await;

        if let Err(e) = result {
            warn!(package = ?entry.package, "Failed to deliver telemetry entry: {}", e);
        }
    }

    debug!("Telemetry worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::telemetry::sink::{LoggingError, MockLogSink};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(Stack::Backend, Level::Info, Package::Service, message).unwrap()
    }

    #[tokio::test]
    async fn test_worker_delivers_entries_in_order() {
        let mut sink = MockLogSink::new();
        let mut seq = mockall::Sequence::new();
        sink.expect_log()
            .withf(|e| e.message == "first")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_log()
            .withf(|e| e.message == "second")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let (handle, rx) = TelemetryHandle::channel(10);
        handle.emit(entry("first"));
        handle.emit(entry("second"));
        drop(handle);

        run_telemetry_worker(rx, Arc::new(sink)).await;
    }

    #[tokio::test]
    async fn test_worker_retries_failed_delivery() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut sink = MockLogSink::new();
        sink.expect_log().times(2).returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(LoggingError::Transport("connection refused".to_string()))
            } else {
                Ok(())
            }
        });

        let (handle, rx) = TelemetryHandle::channel(10);
        handle.emit(entry("retry me"));
        drop(handle);

        run_telemetry_worker(rx, Arc::new(sink)).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_retries() {
        let mut sink = MockLogSink::new();
        sink.expect_log()
            .times(RETRY_ATTEMPTS + 1)
            .returning(|_| Err(LoggingError::Rejected("401 Unauthorized".to_string())));

        let (handle, rx) = TelemetryHandle::channel(10);
        handle.emit(entry("doomed"));
        drop(handle);

        run_telemetry_worker(rx, Arc::new(sink)).await;
    }

    #[test]
    fn test_emit_drops_when_queue_full() {
        let (handle, mut rx) = TelemetryHandle::channel(1);

        handle.emit(entry("kept"));
        handle.emit(entry("dropped"));

        assert_eq!(rx.try_recv().unwrap().message, "kept");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_emit_after_worker_gone_is_silent() {
        let (handle, rx) = TelemetryHandle::channel(4);
        drop(rx);

        handle.backend(Level::Info, Package::Service, "nobody listening");

        assert!(handle.is_closed());
    }

    #[test]
    fn test_backend_skips_invalid_entries() {
        let (handle, mut rx) = TelemetryHandle::channel(4);

        handle.backend(Level::Info, Package::Page, "frontend package");
        handle.backend(Level::Info, Package::Handler, "ok");

        assert_eq!(rx.try_recv().unwrap().package, Package::Handler);
        assert!(rx.try_recv().is_err());
    }
}
