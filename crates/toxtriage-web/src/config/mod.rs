//! Configuration loading for Toxtriage.
//! Reads toxtriage.toml from the current directory or the path in the
//! TOXTRIAGE_CONFIG env var. Every section has usable defaults, so a
//! missing file starts the service against local defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub gemini: Option<GeminiConfig>,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Leave empty to read TOXTRIAGE_GEMINI_API_KEY / GOOGLE_API_KEY.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

fn default_gemini_model() -> String { "gemini-2.0-flash".to_string() }

impl GeminiConfig {
    /// Config value first, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var("TOXTRIAGE_GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
    /// Pull the model on startup when it is not installed yet.
    #[serde(default = "bool_true")]
    pub auto_pull: bool,
}

fn default_ollama_url()   -> String { "http://localhost:11434".to_string() }
fn default_ollama_model() -> String { "llama3.2".to_string() }
fn bool_true() -> bool { true }

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
            auto_pull: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_classifier_url")]
    pub base_url: String,
}

fn default_classifier_url() -> String { "http://localhost:8080".to_string() }

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { base_url: default_classifier_url() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_escalate_threshold")]
    pub escalate_threshold: f64,
    #[serde(default = "default_flag_threshold")]
    pub flag_threshold: f64,
}

fn default_escalate_threshold() -> f64 { 0.40 }
fn default_flag_threshold()     -> f64 { 0.50 }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            escalate_threshold: default_escalate_threshold(),
            flag_threshold: default_flag_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

fn default_dataset_path() -> String { "data/benchmark.csv".to_string() }

impl Default for DatasetConfig {
    fn default() -> Self {
        Self { path: default_dataset_path() }
    }
}

mod tests;

impl Config {
    /// Load configuration from toxtriage.toml.
    /// Checks TOXTRIAGE_CONFIG env var first, then the current directory.
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("TOXTRIAGE_CONFIG")
            .unwrap_or_else(|_| "toxtriage.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::info!(path, "no config file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("failed to parse {path}: {e}"))?;
        Ok(config)
    }
}
