//! Log sink that POSTs entries to a remote collector.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::entry::LogEntry;
use super::sink::{LogSink, LoggingError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends each entry as JSON with a Bearer token.
pub struct HttpLogSink {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpLogSink {
    /// # Errors
    ///
    /// Returns [`LoggingError::Transport`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self, LoggingError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LoggingError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl LogSink for HttpLogSink {
    async fn log(&self, entry: &LogEntry) -> Result<(), LoggingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(entry)
            .send()
            .await
            .map_err(|e| LoggingError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(LoggingError::Rejected(format!("{status}: {body}")))
    }
}
