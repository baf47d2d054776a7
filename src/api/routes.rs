//! API route configuration.

use crate::api::handlers::{
    health_handler, list_urls_handler, redirect_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /shorturls`         - Create a short link
/// - `GET  /shorturls/{code}`  - Statistics for a short link
/// - `GET  /stats/{code}`      - Statistics for a short link
/// - `GET  /urls`              - List live short links
/// - `GET  /health`            - Health check
/// - `GET  /{code}`            - Redirect (records a click)
///
/// Fixed paths take precedence over `/{code}`; the matching names are
/// reserved and cannot be requested as custom codes.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorturls", post(shorten_handler))
        .route("/shorturls/{code}", get(stats_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/urls", get(list_urls_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}
