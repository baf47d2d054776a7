//! Cross-origin policy for the single-page client.

use tower_http::cors::CorsLayer;

/// Allows any origin, method, and header.
///
/// The client is served from its own origin and only reads public link data.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
