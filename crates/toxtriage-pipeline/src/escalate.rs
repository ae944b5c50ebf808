//! Escalation policy and the second-stage local model call.
//! See ARCHITECTURE.md §5.2

use std::sync::Arc;
use std::time::Instant;

use toxtriage_common::error::{Result, ToxtriageError};
use toxtriage_common::report::{Band, EscalationAnalysis};
use toxtriage_llm::audit::ModerationAuditEntry;
use toxtriage_llm::backend::{strip_code_fences, LlmBackend, LlmRequest, ResponseFormat};

/// Thresholds deciding when a text leaves the fast path.
///
/// Escalation fires strictly above `escalate_threshold`; the toxic flag
/// strictly above `flag_threshold`. Texts between the two are the
/// borderline band the second stage exists for.
#[derive(Debug, Clone, Copy)]
pub struct EscalationPolicy {
    pub escalate_threshold: f64,
    pub flag_threshold: f64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self { escalate_threshold: 0.40, flag_threshold: 0.50 }
    }
}

impl EscalationPolicy {
    /// Same policy with a caller-supplied escalation threshold.
    pub fn with_escalate_threshold(self, threshold: f64) -> Self {
        Self { escalate_threshold: threshold, ..self }
    }

    pub fn should_escalate(&self, max_score: f64) -> bool {
        max_score > self.escalate_threshold
    }

    pub fn is_toxic(&self, max_score: f64) -> bool {
        max_score > self.flag_threshold
    }

    pub fn band(&self, max_score: f64) -> Band {
        if self.is_toxic(max_score) {
            Band::Toxic
        } else if self.should_escalate(max_score) {
            Band::Borderline
        } else {
            Band::Safe
        }
    }
}

/// Second-stage analyzer backed by the heavier local model.
pub struct Escalator {
    backend: Arc<dyn LlmBackend>,
    backend_name: String,
}

impl Escalator {
    pub fn new(backend: Arc<dyn LlmBackend>, backend_name: impl Into<String>) -> Self {
        Self { backend, backend_name: backend_name.into() }
    }

    fn prompt(text: &str) -> String {
        format!(
            "You are a content moderation AI. Analyze the following text for toxicity.\n\
             Text: \"{text}\"\n\
             \n\
             Return a valid JSON object with the following fields:\n\
             - \"is_ironic\": boolean (true if sarcasm/irony is detected)\n\
             - \"justification\": string (Explain why it is toxic or safe in English)\n\
             - \"deciding_fragments\": list of strings (specific quotes from the text)\n\
             \n\
             Return ONLY JSON."
        )
    }

    /// Run the contextual analysis for one text.
    pub async fn analyze(
        &self,
        text: &str,
    ) -> Result<(EscalationAnalysis, ModerationAuditEntry)> {
        let started = Instant::now();
        let resp = self.backend
            .complete(LlmRequest::user(Self::prompt(text), ResponseFormat::Json))
            .await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let analysis: EscalationAnalysis =
            serde_json::from_str(strip_code_fences(&resp.content)).map_err(|e| {
                ToxtriageError::Validation(format!("escalation response was not valid JSON: {e}"))
            })?;

        let audit = ModerationAuditEntry::new(
            resp.model,
            self.backend_name.clone(),
            resp.prompt_tokens,
            resp.completion_tokens,
            true,
            &resp.content,
            latency_ms,
        );
        Ok((analysis, audit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let policy = EscalationPolicy::default();
        assert!(policy.flag_threshold > policy.escalate_threshold,
            "Flag threshold ({}) should be above escalation threshold ({})",
            policy.flag_threshold, policy.escalate_threshold);
    }

    #[test]
    fn test_escalation_is_strictly_above_threshold() {
        let policy = EscalationPolicy::default();
        assert!(!policy.should_escalate(0.40));
        assert!(policy.should_escalate(0.41));
        assert!(!policy.is_toxic(0.50));
        assert!(policy.is_toxic(0.51));
    }

    #[test]
    fn test_band_assignment() {
        let policy = EscalationPolicy::default();
        assert_eq!(policy.band(0.10), Band::Safe);
        assert_eq!(policy.band(0.45), Band::Borderline);
        assert_eq!(policy.band(0.90), Band::Toxic);
        // Boundary values stay in the lower band
        assert_eq!(policy.band(0.40), Band::Safe);
        assert_eq!(policy.band(0.50), Band::Borderline);
    }

    #[test]
    fn test_threshold_override() {
        let policy = EscalationPolicy::default().with_escalate_threshold(0.25);
        assert!(policy.should_escalate(0.30));
        assert_eq!(policy.flag_threshold, 0.50);
    }

    #[test]
    fn test_prompt_embeds_the_text() {
        let p = Escalator::prompt("you muppet");
        assert!(p.contains("Text: \"you muppet\""));
        assert!(p.contains("Return ONLY JSON"));
    }
}
