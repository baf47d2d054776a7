//! Click entity representing a single successful redirect.

use chrono::{DateTime, Utc};

/// Recorded in place of a missing or empty `User-Agent` header.
pub const UNKNOWN_USER_AGENT: &str = "unknown";

/// Recorded in place of a missing or empty `Referer` header.
pub const DIRECT_REFERRER: &str = "direct";

/// A click recorded when a short code is resolved.
///
/// Client metadata is never optional here: absent headers are replaced by
/// [`UNKNOWN_USER_AGENT`] and [`DIRECT_REFERRER`] so analytics consumers
/// always see a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    pub referrer: String,
}

impl ClickEvent {
    /// Creates a click event, substituting sentinels for missing metadata.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let click = ClickEvent::new(Utc::now(), Some("Mozilla/5.0"), None);
    /// assert_eq!(click.referrer, "direct");
    /// ```
    pub fn new(timestamp: DateTime<Utc>, user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            timestamp,
            user_agent: or_sentinel(user_agent, UNKNOWN_USER_AGENT),
            referrer: or_sentinel(referrer, DIRECT_REFERRER),
        }
    }
}

fn or_sentinel(value: Option<&str>, sentinel: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => sentinel.to_string(),
    }
}
