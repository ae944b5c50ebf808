//! Local hybrid batch endpoint.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use toxtriage_pipeline::TextAnalysis;

use crate::error::ApiError;
use crate::state::{AppEvent, SharedState};

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub texts: Vec<String>,
    /// Per-request override of the escalation threshold.
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<TextAnalysis>,
    pub total_processed: usize,
}

/// POST /api/analyze-batch — fast classifier over the whole batch,
/// escalation for texts crossing the threshold.
pub async fn analyze_batch(
    State(state): State<SharedState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    if req.texts.is_empty() {
        return Err(ApiError::bad_request("input list 'texts' cannot be empty"));
    }
    if let Some(t) = req.threshold {
        if !(0.0..=1.0).contains(&t) {
            return Err(ApiError::bad_request(format!(
                "threshold {t} outside [0, 1]"
            )));
        }
    }

    info!(batch = req.texts.len(), "processing batch");
    let (results, audit) = state.pipeline.analyze_batch(&req.texts, req.threshold).await?;

    let escalated = audit.len();
    state.record_audit(audit);
    state.emit(AppEvent::BatchProcessed { total: results.len(), escalated });

    let total_processed = results.len();
    Ok(Json(BatchResponse { results, total_processed }))
}
