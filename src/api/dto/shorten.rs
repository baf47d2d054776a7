//! DTOs for the link creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create one short link.
///
/// `validity` must be a JSON integer; strings and fractions are rejected
/// while the body is parsed.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(required(message = "URL is required"))]
    pub url: Option<String>,

    /// Lifetime in minutes.
    #[validate(range(min = 1, message = "Validity must be a positive number of minutes"))]
    pub validity: Option<i64>,

    /// Optional custom short code.
    #[validate(length(min = 1, max = 10, message = "Shortcode must be 1-10 characters"))]
    pub shortcode: Option<String>,
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}
