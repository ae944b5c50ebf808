//! First-run model provisioning for the local Ollama service.
//! See ARCHITECTURE.md §4.3
//!
//! On startup the server checks whether the configured model is already
//! installed (`GET /api/tags`) and pulls it (`POST /api/pull`) only when
//! absent, so a container can be restarted without re-downloading
//! gigabytes of weights.

use serde::Deserialize;
use tracing::info;

use crate::backend::LlmError;

/// Result of an [`ModelProvisioner::ensure_model`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The model was already installed; nothing was downloaded.
    AlreadyPresent,
    /// The model was pulled from the registry.
    Pulled,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TaggedModel>,
}

#[derive(Debug, Deserialize)]
struct TaggedModel {
    name: String,
}

pub struct ModelProvisioner {
    base_url: String,
    client: reqwest::Client,
}

impl ModelProvisioner {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }

    /// Make sure `model` is installed, pulling it if needed. Idempotent:
    /// calling this again right after a successful run does nothing.
    pub async fn ensure_model(&self, model: &str) -> Result<ProvisionOutcome, LlmError> {
        let installed = self.installed_models().await?;
        if model_present(&installed, model) {
            info!(model, "model already present, skipping pull");
            return Ok(ProvisionOutcome::AlreadyPresent);
        }

        info!(model, "model not found locally, pulling");
        let url = format!("{}/api/pull", self.base_url.trim_end_matches('/'));
        let resp = self.client
            .post(&url)
            .json(&serde_json::json!({ "model": model, "stream": false }))
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body: serde_json::Value = resp.json().await?;
        if status >= 400 {
            let msg = body["error"].as_str().unwrap_or("unknown pull error").to_string();
            return Err(LlmError::ApiError { status, message: msg });
        }
        if let Some(err) = body["error"].as_str() {
            return Err(LlmError::Unavailable(format!("pull failed: {err}")));
        }

        info!(model, "model pulled");
        Ok(ProvisionOutcome::Pulled)
    }

    /// Names of all models the Ollama instance currently serves.
    pub async fn installed_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/api/tags", self.base_url.trim_end_matches('/'));
        let tags: TagsResponse = self.client.get(&url).send().await?.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

/// True if `wanted` matches any installed model name. Ollama lists models
/// with an explicit tag (`llama3.2:latest`), while callers usually name
/// the bare model, so a missing tag matches any tag of the same model.
pub fn model_present(installed: &[String], wanted: &str) -> bool {
    installed.iter().any(|name| {
        name == wanted
            || (!wanted.contains(':')
                && name.split(':').next().is_some_and(|base| base == wanted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_bare_name_matches_latest_tag() {
        let models = installed(&["llama3.2:latest", "nomic-embed-text:latest"]);
        assert!(model_present(&models, "llama3.2"));
    }

    #[test]
    fn test_exact_tag_match() {
        let models = installed(&["llama3.2:3b"]);
        assert!(model_present(&models, "llama3.2:3b"));
        assert!(!model_present(&models, "llama3.2:1b"));
    }

    #[test]
    fn test_bare_name_matches_any_tag() {
        let models = installed(&["llama3.2:3b"]);
        assert!(model_present(&models, "llama3.2"));
    }

    #[test]
    fn test_absent_model() {
        let models = installed(&["mistral:latest"]);
        assert!(!model_present(&models, "llama3.2"));
        assert!(!model_present(&[], "llama3.2"));
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        // "llama3" must not match "llama3.2:latest"
        let models = installed(&["llama3.2:latest"]);
        assert!(!model_present(&models, "llama3"));
    }
}
