//! Link creation, resolution, and statistics service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::{Registry, RegistryError, UrlRecord};
use crate::error::AppError;
use crate::infrastructure::telemetry::{Level, Package, TelemetryHandle};
use crate::utils::code_generator::validate_custom_code;
use crate::utils::url_validator::validate_url;

/// Validity limits applied to create requests.
#[derive(Debug, Clone, Copy)]
pub struct ValidityPolicy {
    /// Minutes used when the request omits `validity`.
    pub default_minutes: i64,
    /// Largest accepted `validity`.
    pub max_minutes: i64,
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self {
            default_minutes: 30,
            max_minutes: 525_600,
        }
    }
}

/// Result of a successful create.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub code: String,
    pub short_link: String,
    pub expires_at: DateTime<Utc>,
}

/// Service in front of the [`Registry`].
///
/// Applies request-level validation (URL syntax, validity bounds, reserved
/// codes) before touching the registry, formats short links from the base URL,
/// and reports each outcome to telemetry after the registry call has returned.
pub struct LinkService {
    registry: Arc<Registry>,
    base_url: String,
    validity: ValidityPolicy,
    telemetry: TelemetryHandle,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// A trailing `/` on `base_url` is ignored.
    pub fn new(
        registry: Arc<Registry>,
        base_url: impl Into<String>,
        validity: ValidityPolicy,
        telemetry: TelemetryHandle,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            registry,
            base_url,
            validity,
            telemetry,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `original_url` - Absolute HTTP(S) URL to redirect to
    /// - `validity_minutes` - Lifetime in minutes, defaults to the configured value
    /// - `requested_code` - Optional custom code (1-10 letters/digits)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if:
    /// - URL is missing or malformed
    /// - Validity is not positive or exceeds the maximum
    /// - Custom code is malformed or reserved
    ///
    /// Returns [`AppError::Conflict`] if the custom code is live.
    pub fn create_short_link(
        &self,
        original_url: Option<&str>,
        validity_minutes: Option<i64>,
        requested_code: Option<&str>,
    ) -> Result<CreatedLink, AppError> {
        let original_url = validate_url(original_url.unwrap_or_default()).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "field": "url" }))
        })?;

        let minutes = self.validity_minutes(validity_minutes)?;

        if let Some(code) = requested_code {
            validate_custom_code(code)?;
        }

        let validity = Duration::try_minutes(minutes).ok_or_else(|| {
            AppError::bad_request("Validity is out of range", json!({ "validity": minutes }))
        })?;

        let result = self.registry.create(original_url, validity, requested_code);

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                self.report_failure("create", requested_code.unwrap_or("-"), &err);
                return Err(err.into());
            }
        };

        metrics::counter!("links_created_total").increment(1);
        self.telemetry.backend(
            Level::Info,
            Package::Service,
            format!(
                "short link {} created, expires {}",
                record.code,
                record.expires_at.to_rfc3339()
            ),
        );

        Ok(CreatedLink {
            short_link: self.short_link(&record.code),
            code: record.code,
            expires_at: record.expires_at,
        })
    }

    /// Resolves `code` for a redirect, recording one click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and
    /// [`AppError::Expired`] for lapsed ones.
    pub fn resolve(
        &self,
        code: &str,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Result<String, AppError> {
        match self.registry.resolve(code, user_agent, referrer) {
            Ok(url) => {
                metrics::counter!("redirects_total").increment(1);
                self.telemetry.backend(
                    Level::Debug,
                    Package::Handler,
                    format!("short link {code} resolved"),
                );
                Ok(url)
            }
            Err(err) => {
                self.report_failure("resolve", code, &err);
                Err(err.into())
            }
        }
    }

    /// Returns the record for `code` without recording a click.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub fn get_stats(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.registry.get_stats(code).map_err(|err| {
            self.report_failure("stats", code, &err);
            err.into()
        })
    }

    /// Returns all live records, oldest first.
    pub fn list_active(&self) -> Vec<UrlRecord> {
        self.registry.list_active()
    }

    /// Number of live records.
    pub fn live_count(&self) -> usize {
        self.registry.live_count()
    }

    /// Constructs the full short link for `code`.
    pub fn short_link(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    fn validity_minutes(&self, requested: Option<i64>) -> Result<i64, AppError> {
        let minutes = requested.unwrap_or(self.validity.default_minutes);

        if minutes <= 0 {
            return Err(AppError::bad_request(
                "Validity must be a positive number of minutes",
                json!({ "validity": minutes }),
            ));
        }

        if minutes > self.validity.max_minutes {
            return Err(AppError::bad_request(
                format!("Validity cannot exceed {} minutes", self.validity.max_minutes),
                json!({ "validity": minutes }),
            ));
        }

        Ok(minutes)
    }

    fn report_failure(&self, operation: &str, code: &str, err: &RegistryError) {
        let level = match err {
            RegistryError::Internal(_) => Level::Error,
            _ => Level::Warn,
        };

        self.telemetry.backend(
            level,
            Package::Service,
            format!("{operation} failed for {code}: {err}"),
        );
    }
}
