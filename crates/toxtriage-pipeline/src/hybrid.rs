//! Hybrid batch pipeline: fast classifier first, escalation second.
//! See ARCHITECTURE.md §5.4
//!
//! The whole batch is scored in a single classifier call, then texts
//! crossing the escalation threshold are sent to the heavier model one
//! by one. A failed escalation degrades that one result (no contextual
//! analysis) instead of failing the batch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use toxtriage_common::error::Result;
use toxtriage_common::report::{max_label_score, Band, EscalationAnalysis, LabelScore};
use toxtriage_llm::audit::ModerationAuditEntry;

use crate::classifier::FastClassifier;
use crate::escalate::{EscalationPolicy, Escalator};

/// Full local-path result for a single text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub text: String,
    pub scores: Vec<LabelScore>,
    pub max_score: f64,
    pub is_toxic: bool,
    pub band: Band,
    pub escalation: Option<EscalationAnalysis>,
}

pub struct HybridPipeline {
    classifier: Arc<dyn FastClassifier>,
    escalator: Escalator,
    policy: EscalationPolicy,
}

impl HybridPipeline {
    pub fn new(
        classifier: Arc<dyn FastClassifier>,
        escalator: Escalator,
        policy: EscalationPolicy,
    ) -> Self {
        Self { classifier, escalator, policy }
    }

    pub fn policy(&self) -> EscalationPolicy {
        self.policy
    }

    /// Analyze a batch. Results come back in input order, one per text.
    /// `threshold` overrides the configured escalation threshold for this
    /// batch only. Audit entries cover every escalation call that ran.
    pub async fn analyze_batch(
        &self,
        texts: &[String],
        threshold: Option<f64>,
    ) -> Result<(Vec<TextAnalysis>, Vec<ModerationAuditEntry>)> {
        let policy = match threshold {
            Some(t) => self.policy.with_escalate_threshold(t),
            None => self.policy,
        };

        debug!(batch = texts.len(), "scoring batch with fast classifier");
        let batch_scores = self.classifier.classify(texts).await?;

        let mut results = Vec::with_capacity(texts.len());
        let mut audit = Vec::new();

        for (text, scores) in texts.iter().zip(batch_scores) {
            let max_score = max_label_score(&scores);
            let band = policy.band(max_score);

            let escalation = if policy.should_escalate(max_score) {
                debug!(max_score, threshold = policy.escalate_threshold, "escalating text");
                match self.escalator.analyze(text).await {
                    Ok((analysis, entry)) => {
                        audit.push(entry);
                        Some(analysis)
                    }
                    Err(e) => {
                        warn!(error = %e, "escalation failed, returning fast-path result only");
                        None
                    }
                }
            } else {
                None
            };

            results.push(TextAnalysis {
                text: text.clone(),
                scores,
                max_score,
                is_toxic: policy.is_toxic(max_score),
                band,
                escalation,
            });
        }

        Ok((results, audit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use toxtriage_common::error::ToxtriageError;
    use toxtriage_llm::backend::{LlmBackend, LlmError, LlmRequest, LlmResponse};

    /// Classifier stub: the max score for each text is fixed up front.
    struct FixedClassifier {
        maxima: Vec<f64>,
    }

    #[async_trait]
    impl FastClassifier for FixedClassifier {
        async fn classify(&self, texts: &[String]) -> Result<Vec<Vec<LabelScore>>> {
            assert_eq!(texts.len(), self.maxima.len());
            Ok(self.maxima.iter().map(|&m| vec![
                LabelScore { label: "toxic".to_string(), score: m },
                LabelScore { label: "threat".to_string(), score: m / 2.0 },
            ]).collect())
        }
    }

    struct JsonBackend;

    #[async_trait]
    impl LlmBackend for JsonBackend {
        async fn complete(&self, _req: LlmRequest) -> std::result::Result<LlmResponse, LlmError> {
            Ok(LlmResponse {
                content: r#"{"is_ironic": true, "justification": "Sarcastic jab.", "deciding_fragments": []}"#.to_string(),
                model: "llama3.2".to_string(),
                prompt_tokens: 90,
                completion_tokens: 30,
            })
        }
        fn model_id(&self) -> &str { "llama3.2" }
        fn is_local(&self) -> bool { true }
    }

    struct FailingBackend;

    #[async_trait]
    impl LlmBackend for FailingBackend {
        async fn complete(&self, _req: LlmRequest) -> std::result::Result<LlmResponse, LlmError> {
            Err(LlmError::Unavailable("connection refused".to_string()))
        }
        fn model_id(&self) -> &str { "llama3.2" }
        fn is_local(&self) -> bool { true }
    }

    /// Classifier stub that returns the wrong batch size.
    struct ShortClassifier;

    #[async_trait]
    impl FastClassifier for ShortClassifier {
        async fn classify(&self, _texts: &[String]) -> Result<Vec<Vec<LabelScore>>> {
            Err(ToxtriageError::Pipeline("classifier returned 1 score sets for 2 texts".to_string()))
        }
    }

    fn pipeline(maxima: Vec<f64>, backend: Arc<dyn LlmBackend>) -> HybridPipeline {
        HybridPipeline::new(
            Arc::new(FixedClassifier { maxima }),
            Escalator::new(backend, "ollama"),
            EscalationPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_only_suspicious_texts_escalate() {
        let texts: Vec<String> = ["nice weather", "hmm", "you absolute muppet"]
            .iter().map(|s| s.to_string()).collect();
        let p = pipeline(vec![0.10, 0.45, 0.92], Arc::new(JsonBackend));

        let (results, audit) = p.analyze_batch(&texts, None).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].band, Band::Safe);
        assert!(results[0].escalation.is_none());

        assert_eq!(results[1].band, Band::Borderline);
        assert!(!results[1].is_toxic);
        assert!(results[1].escalation.as_ref().unwrap().is_ironic);

        assert_eq!(results[2].band, Band::Toxic);
        assert!(results[2].is_toxic);
        assert!(results[2].escalation.is_some());

        // One audit entry per escalation call, all flagged as escalations
        assert_eq!(audit.len(), 2);
        assert!(audit.iter().all(|e| e.escalated && e.backend == "ollama"));
    }

    #[tokio::test]
    async fn test_results_preserve_input_order() {
        let texts: Vec<String> = (0..5).map(|i| format!("text {i}")).collect();
        let p = pipeline(vec![0.9, 0.1, 0.8, 0.2, 0.7], Arc::new(JsonBackend));

        let (results, _) = p.analyze_batch(&texts, None).await.unwrap();
        let echoed: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(echoed, vec!["text 0", "text 1", "text 2", "text 3", "text 4"]);
    }

    #[tokio::test]
    async fn test_escalation_failure_degrades_single_result() {
        let texts: Vec<String> = vec!["borderline".to_string(), "fine".to_string()];
        let p = pipeline(vec![0.60, 0.05], Arc::new(FailingBackend));

        let (results, audit) = p.analyze_batch(&texts, None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_toxic);
        assert!(results[0].escalation.is_none());
        assert!(audit.is_empty());
    }

    #[tokio::test]
    async fn test_request_threshold_override() {
        let texts: Vec<String> = vec!["mildly spicy".to_string()];
        let p = pipeline(vec![0.30], Arc::new(JsonBackend));

        let (results, _) = p.analyze_batch(&texts, Some(0.20)).await.unwrap();
        assert!(results[0].escalation.is_some());

        let (results, _) = p.analyze_batch(&texts, None).await.unwrap();
        assert!(results[0].escalation.is_none());
    }

    #[tokio::test]
    async fn test_classifier_error_fails_batch() {
        let p = HybridPipeline::new(
            Arc::new(ShortClassifier),
            Escalator::new(Arc::new(JsonBackend), "ollama"),
            EscalationPolicy::default(),
        );
        let texts: Vec<String> = vec!["a".to_string(), "b".to_string()];
        assert!(p.analyze_batch(&texts, None).await.is_err());
    }
}
