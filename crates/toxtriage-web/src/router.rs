//! Axum router — maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

use crate::handlers::{
    analyze::{analyze, appeal},
    batch::analyze_batch,
    dashboard::dashboard,
    health::health,
    system::{api_audit, system_page},
};
use crate::sse::sse_handler;
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",       get(dashboard))
        .route("/system", get(system_page))

        // SSE streaming
        .route("/api/events", get(sse_handler))

        // API endpoints
        .route("/api/analyze",       post(analyze))
        .route("/api/analyze-batch", post(analyze_batch))
        .route("/api/appeal",        post(appeal))
        .route("/api/audit",         get(api_audit))
        .route("/api/health",        get(health))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
