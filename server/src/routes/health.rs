use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use shadowcheck_core::Timestamp;

#[derive(Debug, Serialize)]
pub(super) struct RootResponse {
    message: &'static str,
    renderer_available: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct HealthResponse {
    status: &'static str,
    timestamp: String,
    renderer_available: bool,
}

pub(super) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "X Shadow Ban Checker API is running",
        renderer_available: state.renderer_available,
    })
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Timestamp::now().to_rfc3339(),
        renderer_available: state.renderer_available,
    })
}
