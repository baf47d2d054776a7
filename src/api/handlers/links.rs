//! Handler for listing live links.

use axum::{Json, extract::State};

use crate::api::dto::links::LinkView;
use crate::state::AppState;

/// Lists all live short links, oldest first.
///
/// # Endpoint
///
/// `GET /urls`
///
/// Expired links are omitted even if the sweeper has not removed them yet.
pub async fn list_urls_handler(State(state): State<AppState>) -> Json<Vec<LinkView>> {
    let items = state
        .link_service
        .list_active()
        .into_iter()
        .map(|record| {
            let short_link = state.link_service.short_link(&record.code);
            LinkView::from_record(record, short_link)
        })
        .collect();

    Json(items)
}
