//! Toxtriage — hybrid toxicity moderation service.
//! Entry point for the server binary.
//!
//! Run with: cargo run -p toxtriage-web

use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use toxtriage_llm::provision::ProvisionOutcome;
use toxtriage_web::config::Config;
use toxtriage_web::router::build_router;
use toxtriage_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("toxtriage=debug,info")),
        )
        .init();

    info!("☣️ Toxtriage starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded. Local model: {}, escalation threshold: {}",
        config.ollama.model, config.pipeline.escalate_threshold
    );

    // Build app state (backends, pipeline, event channel)
    let state = AppState::from_config(&config);
    if state.cloud.is_none() {
        warn!("No Gemini API key configured — /api/analyze will return 503.");
    }

    // First-run provisioning: make sure the local model is installed.
    // Ollama being down is not fatal; the fast path still works.
    if config.ollama.auto_pull {
        match state.provisioner.ensure_model(&config.ollama.model).await {
            Ok(ProvisionOutcome::AlreadyPresent) => {
                info!("✅ Local model '{}' already installed.", config.ollama.model)
            }
            Ok(ProvisionOutcome::Pulled) => {
                info!("✅ Local model '{}' pulled.", config.ollama.model)
            }
            Err(e) => warn!(
                "Could not provision '{}': {e}. Escalation will fail until Ollama is up.",
                config.ollama.model
            ),
        }
    }

    // Build router and serve
    let app = build_router(state);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
