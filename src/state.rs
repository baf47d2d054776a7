//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::telemetry::TelemetryHandle;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub telemetry: TelemetryHandle,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, telemetry: TelemetryHandle) -> Self {
        Self {
            link_service,
            telemetry,
        }
    }
}
