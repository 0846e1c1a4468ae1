//! Shared application state.

use shadowcheck_api::HumanVerifier;
use shadowcheck_scanner::Detector;
use std::sync::Arc;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Detection pipeline
    pub detector: Arc<Detector>,
    /// Human-verification gate for public checks
    pub verifier: Arc<dyn HumanVerifier>,
    /// Result of the startup renderer probe
    pub renderer_available: bool,
}

impl AppState {
    pub fn new(
        detector: Arc<Detector>,
        verifier: Arc<dyn HumanVerifier>,
        renderer_available: bool,
    ) -> Self {
        Self {
            detector,
            verifier,
            renderer_available,
        }
    }
}
