//! Shared application state for the web server.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::warn;

use toxtriage_llm::audit::ModerationAuditEntry;
use toxtriage_llm::backend::{GeminiBackend, LlmBackend, OllamaBackend};
use toxtriage_llm::provision::ModelProvisioner;
use toxtriage_pipeline::{
    CloudAnalyzer, EscalationPolicy, Escalator, HttpClassifier, HybridPipeline,
};

use crate::config::Config;

/// Most recent audit entries kept in memory for the system page.
const AUDIT_CAPACITY: usize = 256;

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A cloud verdict was produced
    CloudVerdict { score: f64, model: String, latency_ms: u64 },
    /// A local batch finished
    BatchProcessed { total: usize, escalated: usize },
    /// An appeal was answered
    AppealAnswered { was_toxic: bool },
    /// General system notification
    Notification { level: String, message: String },
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    /// Cloud path; None when no API key is configured.
    pub cloud: Option<CloudAnalyzer>,
    pub pipeline: HybridPipeline,
    /// Kept alongside the pipeline for health probing.
    pub classifier: Arc<HttpClassifier>,
    pub provisioner: ModelProvisioner,
    /// Local backend reused by the appeal endpoint.
    pub appeal_backend: Arc<dyn LlmBackend>,
    pub audit: Mutex<Vec<ModerationAuditEntry>>,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let ollama: Arc<dyn LlmBackend> = Arc::new(OllamaBackend::new(
            config.ollama.base_url.clone(),
            config.ollama.model.clone(),
        ));

        let cloud = match &config.gemini {
            Some(gemini) => match gemini.resolve_api_key() {
                Some(key) => Some(CloudAnalyzer::new(
                    Arc::new(GeminiBackend::new(key, gemini.model.clone())),
                    "gemini",
                )),
                None => {
                    warn!(
                        "Gemini configured but no API key found \
                         (set gemini.api_key, TOXTRIAGE_GEMINI_API_KEY or GOOGLE_API_KEY)"
                    );
                    None
                }
            },
            None => None,
        };

        let classifier = Arc::new(HttpClassifier::new(config.classifier.base_url.clone()));
        let policy = EscalationPolicy {
            escalate_threshold: config.pipeline.escalate_threshold,
            flag_threshold: config.pipeline.flag_threshold,
        };
        let pipeline = HybridPipeline::new(
            classifier.clone(),
            Escalator::new(ollama.clone(), "ollama"),
            policy,
        );

        let (event_tx, _) = broadcast::channel(256);

        Self {
            cloud,
            pipeline,
            classifier,
            provisioner: ModelProvisioner::new(config.ollama.base_url.clone()),
            appeal_backend: ollama,
            audit: Mutex::new(Vec::new()),
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    /// Best-effort event push; nobody listening is fine.
    pub fn emit(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Append audit entries, keeping only the most recent ones.
    pub fn record_audit(&self, entries: impl IntoIterator<Item = ModerationAuditEntry>) {
        let mut audit = self.audit.lock().expect("audit lock poisoned");
        audit.extend(entries);
        if audit.len() > AUDIT_CAPACITY {
            let excess = audit.len() - AUDIT_CAPACITY;
            audit.drain(..excess);
        }
    }

    /// Snapshot of the retained audit log, newest last.
    pub fn audit_snapshot(&self) -> Vec<ModerationAuditEntry> {
        self.audit.lock().expect("audit lock poisoned").clone()
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(latency: u64) -> ModerationAuditEntry {
        ModerationAuditEntry::new("llama3.2".into(), "ollama".into(), 10, 5, true, "{}", latency)
    }

    #[test]
    fn test_audit_log_is_capped() {
        let state = AppState::from_config(&Config::default());
        state.record_audit((0..300).map(|i| entry(i as u64)));

        let snapshot = state.audit_snapshot();
        assert_eq!(snapshot.len(), AUDIT_CAPACITY);
        // Oldest entries were dropped
        assert_eq!(snapshot.first().unwrap().latency_ms, 300 - AUDIT_CAPACITY as u64);
        assert_eq!(snapshot.last().unwrap().latency_ms, 299);
    }

    #[test]
    fn test_default_config_has_no_cloud_path() {
        let state = AppState::from_config(&Config::default());
        assert!(state.cloud.is_none());
    }
}
