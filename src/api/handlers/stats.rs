//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::links::LinkView;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the full record of a live short link without recording a click.
///
/// # Endpoint
///
/// `GET /stats/{code}` or `GET /shorturls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the short code has expired.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkView>, AppError> {
    let record = state.link_service.get_stats(&code)?;
    let short_link = state.link_service.short_link(&record.code);

    Ok(Json(LinkView::from_record(record, short_link)))
}
