//! Cloud analysis path.
//! See ARCHITECTURE.md §5.3
//!
//! One text in, one structured verdict out. The backend runs at
//! temperature 0.0 with a response schema, so the only interpretation
//! happening here is JSON parsing plus contract validation.

use std::sync::Arc;
use std::time::Instant;

use toxtriage_common::error::{Result, ToxtriageError};
use toxtriage_common::report::ToxicityVerdict;
use toxtriage_llm::audit::ModerationAuditEntry;
use toxtriage_llm::backend::{strip_code_fences, LlmBackend, LlmRequest, ResponseFormat};

pub struct CloudAnalyzer {
    backend: Arc<dyn LlmBackend>,
    backend_name: String,
}

impl CloudAnalyzer {
    pub fn new(backend: Arc<dyn LlmBackend>, backend_name: impl Into<String>) -> Self {
        Self { backend, backend_name: backend_name.into() }
    }

    fn prompt(text: &str) -> String {
        format!(
            "Analyze the following text fragment for toxicity levels.\n\
             You are a precise content moderation classifier.\n\
             \n\
             Text to analyze:\n\
             \"{text}\"\n\
             \n\
             Return the result in a JSON format strictly adhering to the defined schema.\n\
             Scores (float) must be between 0.0 and 1.0.\n\
             Quote fragments verbatim from the text.\n\
             Provide the reasoning in English."
        )
    }

    /// JSON schema the backend's structured-output mode is constrained by.
    pub fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "score": {
                    "type": "number",
                    "description": "Overall toxicity score (0-1). Is the comment rude, disrespectful, or unreasonable?"
                },
                "attributes": {
                    "type": "object",
                    "properties": {
                        "irony":           { "type": "boolean", "description": "Sarcasm or irony detected." },
                        "profanity":       { "type": "boolean", "description": "Profane or vulgar wording present." },
                        "identity_attack": { "type": "boolean", "description": "Attack based on race, religion, orientation, gender, disability, etc." }
                    },
                    "required": ["irony", "profanity", "identity_attack"]
                },
                "fragments": {
                    "type": "object",
                    "properties": {
                        "problematic_words": {
                            "type": "array", "items": { "type": "string" },
                            "description": "Words or short phrases that carry the toxicity, quoted verbatim."
                        },
                        "decisive_spans": {
                            "type": "array", "items": { "type": "string" },
                            "description": "Spans that were decisive for the score, quoted verbatim."
                        }
                    },
                    "required": ["problematic_words", "decisive_spans"]
                },
                "reasoning": {
                    "type": "string",
                    "description": "Detailed reasoning for the classification decisions."
                },
                "categories": {
                    "type": "object",
                    "description": "Per-category scores (0-1): toxicity, severe_toxicity, obscene, threat, insult, identity_attack, sexual_explicit.",
                    "additionalProperties": { "type": "number" }
                }
            },
            "required": ["score", "attributes", "fragments", "reasoning"]
        })
    }

    /// Analyze one text and return the validated verdict plus an audit entry.
    pub async fn analyze(
        &self,
        text: &str,
    ) -> Result<(ToxicityVerdict, ModerationAuditEntry)> {
        let started = Instant::now();
        let req = LlmRequest::user(
            Self::prompt(text),
            ResponseFormat::Schema(Self::response_schema()),
        );
        let resp = self.backend.complete(req).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let verdict: ToxicityVerdict =
            serde_json::from_str(strip_code_fences(&resp.content)).map_err(|e| {
                ToxtriageError::Validation(format!("cloud verdict was not valid JSON: {e}"))
            })?;
        let verdict = verdict.validated(text)?;

        let audit = ModerationAuditEntry::new(
            resp.model,
            self.backend_name.clone(),
            resp.prompt_tokens,
            resp.completion_tokens,
            false,
            &resp.content,
            latency_ms,
        );
        Ok((verdict, audit))
    }
}
