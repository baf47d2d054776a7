//! URL record entity representing one short code mapping.

use chrono::{DateTime, Utc};

use super::click::ClickEvent;

/// A short code mapped to its original URL, with click analytics.
///
/// Records are only created and mutated by [`crate::domain::Registry`].
/// The only mutation after creation is appending a click, which keeps
/// `click_count` equal to `click_history.len()`.
#[derive(Debug, Clone)]
pub struct UrlRecord {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: u64,
    pub click_history: Vec<ClickEvent>,
}

impl UrlRecord {
    /// Creates a record with no clicks.
    pub fn new(
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            original_url,
            created_at,
            expires_at,
            click_count: 0,
            click_history: Vec::new(),
        }
    }

    /// Returns true once `now` is strictly past the expiry time.
    ///
    /// A record is still live at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub(crate) fn record_click(&mut self, click: ClickEvent) {
        self.click_history.push(click);
        self.click_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record_valid_for(minutes: i64) -> UrlRecord {
        let now = Utc::now();
        UrlRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            now,
            now + Duration::minutes(minutes),
        )
    }

    #[test]
    fn test_record_creation() {
        let record = record_valid_for(30);

        assert_eq!(record.code, "abc123");
        assert_eq!(record.original_url, "https://example.com");
        assert_eq!(record.click_count, 0);
        assert!(record.click_history.is_empty());
        assert_eq!(record.expires_at - record.created_at, Duration::minutes(30));
    }

    #[test]
    fn test_record_expiry_boundary() {
        let record = record_valid_for(1);

        assert!(!record.is_expired_at(record.created_at));
        assert!(!record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_record_click_keeps_count_in_sync() {
        let mut record = record_valid_for(30);

        record.record_click(ClickEvent::new(Utc::now(), Some("curl/8.0"), None));
        record.record_click(ClickEvent::new(Utc::now(), None, Some("https://news.ycombinator.com")));

        assert_eq!(record.click_count, 2);
        assert_eq!(record.click_history.len(), 2);
        assert_eq!(record.click_history[0].user_agent, "curl/8.0");
        assert_eq!(record.click_history[1].referrer, "https://news.ycombinator.com");
    }
}
