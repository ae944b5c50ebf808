//! Cloud analysis and appeal endpoints.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use toxtriage_common::report::ToxicityVerdict;
use toxtriage_pipeline::appeal::{reconsider, Reconsideration};

use crate::error::ApiError;
use crate::state::{AppEvent, SharedState};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub id: Uuid,
    pub verdict: ToxicityVerdict,
    pub model: String,
    pub latency_ms: u64,
}

/// POST /api/analyze — single text through the cloud path.
pub async fn analyze(
    State(state): State<SharedState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request("'text' cannot be empty"));
    }

    let cloud = state.cloud.as_ref().ok_or_else(|| {
        ApiError::unavailable(
            "cloud path not configured (set TOXTRIAGE_GEMINI_API_KEY or GOOGLE_API_KEY)",
        )
    })?;

    let (verdict, audit) = cloud.analyze(&req.text).await?;

    state.emit(AppEvent::CloudVerdict {
        score: verdict.score,
        model: audit.model.clone(),
        latency_ms: audit.latency_ms,
    });

    let response = AnalyzeResponse {
        id: audit.id,
        model: audit.model.clone(),
        latency_ms: audit.latency_ms,
        verdict,
    };
    state.record_audit([audit]);

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct AppealRequest {
    pub text: String,
    pub was_toxic: bool,
}

/// POST /api/appeal — challenge a previous decision.
pub async fn appeal(
    State(state): State<SharedState>,
    Json(req): Json<AppealRequest>,
) -> Result<Json<Reconsideration>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::bad_request("'text' cannot be empty"));
    }

    let reconsideration =
        reconsider(state.appeal_backend.as_ref(), &req.text, req.was_toxic).await?;

    state.emit(AppEvent::AppealAnswered { was_toxic: req.was_toxic });
    Ok(Json(reconsideration))
}
