//! Health probe for the service and its two local dependencies.

use axum::extract::{Json, State};
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Fast classifier server reachable.
    pub classifier: bool,
    /// Ollama instance reachable.
    pub ollama: bool,
}

/// GET /api/health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let classifier = state.classifier.is_reachable().await;
    let ollama = state.provisioner.installed_models().await.is_ok();

    Json(HealthResponse { status: "ok", classifier, ollama })
}
