//! DTOs for link listings and statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ClickEvent, UrlRecord};

/// One recorded redirect.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickInfo {
    pub timestamp: DateTime<Utc>,
    pub user_agent: String,
    pub referrer: String,
}

impl From<ClickEvent> for ClickInfo {
    fn from(click: ClickEvent) -> Self {
        Self {
            timestamp: click.timestamp,
            user_agent: click.user_agent,
            referrer: click.referrer,
        }
    }
}

/// Full view of a live short link.
///
/// Used both as a list item for `GET /urls` and as the body of the stats
/// endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub code: String,
    pub original_url: String,
    pub short_link: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub clicks: u64,
    pub click_history: Vec<ClickInfo>,
}

impl LinkView {
    pub fn from_record(record: UrlRecord, short_link: String) -> Self {
        Self {
            code: record.code,
            original_url: record.original_url,
            short_link,
            created_at: record.created_at,
            expiry: record.expires_at,
            clicks: record.click_count,
            click_history: record.click_history.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
