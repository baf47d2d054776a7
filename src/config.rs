//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:5000`)
//! - `BASE_URL` - Prefix for short links (default: `http://localhost:5000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_VALIDITY_MINUTES` - Validity when a request omits it (default: 30)
//! - `MAX_VALIDITY_MINUTES` - Largest accepted validity (default: 525600, one year; at most 100 years)
//! - `SWEEP_INTERVAL_SECONDS` - Expiry sweep period, `0` disables it (default: 60)
//! - `TELEMETRY_URL` - Log collector endpoint (telemetry disabled if unset)
//! - `TELEMETRY_TOKEN` - Bearer token for the collector (required with `TELEMETRY_URL`)
//! - `TELEMETRY_QUEUE_CAPACITY` - Telemetry buffer size (default: 1000, min: 100)
//!
//! ```bash
//! export BASE_URL="https://s.example.com"
//! export TELEMETRY_URL="http://collector.internal/logs"
//! export TELEMETRY_TOKEN="..."
//! ```

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::application::services::ValidityPolicy;

/// Upper bound for `MAX_VALIDITY_MINUTES`: 100 years of 365.25 days.
pub const MAX_VALIDITY_CEILING_MINUTES: i64 = 100 * 525_960;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub default_validity_minutes: i64,
    pub max_validity_minutes: i64,
    /// Period of the background expiry sweep. `0` disables the sweeper;
    /// expiry is still enforced on every read.
    pub sweep_interval_seconds: u64,
    pub telemetry_url: Option<String>,
    pub telemetry_token: Option<String>,
    pub telemetry_queue_capacity: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string())
            .trim_end_matches('/')
            .to_string();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let default_validity_minutes = parse_var("DEFAULT_VALIDITY_MINUTES", 30)?;
        let max_validity_minutes = parse_var("MAX_VALIDITY_MINUTES", 525_600)?;
        let sweep_interval_seconds = parse_var("SWEEP_INTERVAL_SECONDS", 60)?;
        let telemetry_queue_capacity = parse_var("TELEMETRY_QUEUE_CAPACITY", 1_000)?;

        let telemetry_url = env::var("TELEMETRY_URL").ok().filter(|v| !v.is_empty());
        let telemetry_token = env::var("TELEMETRY_TOKEN").ok().filter(|v| !v.is_empty());

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            default_validity_minutes,
            max_validity_minutes,
            sweep_interval_seconds,
            telemetry_url,
            telemetry_token,
            telemetry_queue_capacity,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an HTTP(S) URL
    /// - validity bounds are not positive or the default exceeds the maximum
    /// - `telemetry_queue_capacity` is outside 100..=1_000_000
    /// - `TELEMETRY_URL` is set without `TELEMETRY_TOKEN`
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.default_validity_minutes <= 0 {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be greater than 0, got {}",
                self.default_validity_minutes
            );
        }

        if self.max_validity_minutes < self.default_validity_minutes {
            anyhow::bail!(
                "MAX_VALIDITY_MINUTES ({}) must not be less than DEFAULT_VALIDITY_MINUTES ({})",
                self.max_validity_minutes,
                self.default_validity_minutes
            );
        }

        if self.max_validity_minutes > MAX_VALIDITY_CEILING_MINUTES {
            anyhow::bail!(
                "MAX_VALIDITY_MINUTES must not exceed {} (100 years), got {}",
                MAX_VALIDITY_CEILING_MINUTES,
                self.max_validity_minutes
            );
        }

        if !(100..=1_000_000).contains(&self.telemetry_queue_capacity) {
            anyhow::bail!(
                "TELEMETRY_QUEUE_CAPACITY must be between 100 and 1000000, got {}",
                self.telemetry_queue_capacity
            );
        }

        if let Some(ref url) = self.telemetry_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!(
                    "TELEMETRY_URL must start with 'http://' or 'https://', got '{}'",
                    url
                );
            }
            if self.telemetry_token.is_none() {
                anyhow::bail!("TELEMETRY_TOKEN must be set when TELEMETRY_URL is provided");
            }
        }

        Ok(())
    }

    /// Collector URL and token, when remote telemetry is configured.
    pub fn telemetry_target(&self) -> Option<(&str, &str)> {
        match (&self.telemetry_url, &self.telemetry_token) {
            (Some(url), Some(token)) => Some((url.as_str(), token.as_str())),
            _ => None,
        }
    }

    pub fn validity_policy(&self) -> ValidityPolicy {
        ValidityPolicy {
            default_minutes: self.default_validity_minutes,
            max_minutes: self.max_validity_minutes,
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!(
            "  Validity: default {} min, max {} min",
            self.default_validity_minutes,
            self.max_validity_minutes
        );

        if self.sweep_interval_seconds > 0 {
            tracing::info!("  Expiry sweep: every {}s", self.sweep_interval_seconds);
        } else {
            tracing::info!("  Expiry sweep: disabled");
        }

        match self.telemetry_target() {
            Some((url, token)) => {
                tracing::info!("  Telemetry: {} (token {})", url, mask_secret(token))
            }
            None => tracing::info!("  Telemetry: disabled"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Masks a secret for logging, keeping only its first four characters.
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "***".to_string()
    } else {
        format!("{visible}***")
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
