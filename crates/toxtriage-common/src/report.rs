/// Moderation domain types shared by the cloud and local analysis paths.
/// These are Rust representations of the wire contracts in ARCHITECTURE.md §3.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ToxtriageError;

// ---------------------------------------------------------------------------
// Cloud verdict
// ---------------------------------------------------------------------------

/// Qualitative attributes of the analyzed text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerdictAttributes {
    /// Sarcasm or irony detected.
    pub irony: bool,
    /// Profane or vulgar wording present.
    pub profanity: bool,
    /// Attack on race, religion, orientation, gender, disability, etc.
    pub identity_attack: bool,
}

/// Text fragments the model singled out while classifying.
/// Every element must be a verbatim substring of the analyzed input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerdictFragments {
    /// Individual words or short phrases that carry the toxicity.
    pub problematic_words: Vec<String>,
    /// Longer spans that were decisive for the overall score.
    pub decisive_spans: Vec<String>,
}

/// Structured toxicity verdict returned by the cloud path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToxicityVerdict {
    /// Overall toxicity score in [0, 1].
    pub score: f64,
    pub attributes: VerdictAttributes,
    pub fragments: VerdictFragments,
    /// Free-text rationale for the classification.
    pub reasoning: String,
    /// Per-category scores (toxicity, severe_toxicity, obscene, threat,
    /// insult, identity_attack, sexual_explicit). Optional on the wire.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<String, f64>,
}

impl ToxicityVerdict {
    /// Validate a verdict against the input it was produced for.
    ///
    /// An out-of-range overall or category score is an error. Fragments
    /// that are not substrings of the input are dropped with a warning
    /// rather than failing the whole verdict — models occasionally quote
    /// with altered whitespace or casing, and a lossy fragment list is
    /// still useful to the caller.
    pub fn validated(mut self, input: &str) -> Result<Self, ToxtriageError> {
        if !(0.0..=1.0).contains(&self.score) {
            return Err(ToxtriageError::Validation(format!(
                "overall score {} outside [0, 1]",
                self.score
            )));
        }
        for (label, score) in &self.categories {
            if !(0.0..=1.0).contains(score) {
                return Err(ToxtriageError::Validation(format!(
                    "category '{}' score {} outside [0, 1]",
                    label, score
                )));
            }
        }

        retain_substrings(&mut self.fragments.problematic_words, input, "problematic_words");
        retain_substrings(&mut self.fragments.decisive_spans, input, "decisive_spans");

        Ok(self)
    }
}

fn retain_substrings(fragments: &mut Vec<String>, input: &str, field: &str) {
    fragments.retain(|fragment| {
        let keep = input.contains(fragment.as_str());
        if !keep {
            tracing::warn!(field, fragment = %fragment, "dropping fragment not found in input");
        }
        keep
    });
}

// ---------------------------------------------------------------------------
// Fast classifier output
// ---------------------------------------------------------------------------

/// One category score from the fast six-label classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Highest score across a label set. Returns 0.0 for an empty set.
pub fn max_label_score(scores: &[LabelScore]) -> f64 {
    scores.iter().map(|s| s.score).fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Escalation output
// ---------------------------------------------------------------------------

/// Contextual analysis produced by the heavier local model when the fast
/// classifier's score crosses the escalation threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationAnalysis {
    pub is_ironic: bool,
    pub justification: String,
    pub deciding_fragments: Vec<String>,
}

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// Coarse disposition of a text after the local path ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    /// Below the escalation threshold — no second-stage analysis.
    Safe,
    /// Escalated but not flagged: near the decision boundary.
    Borderline,
    /// At or above the flag threshold.
    Toxic,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Safe => "safe",
            Band::Borderline => "borderline",
            Band::Toxic => "toxic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn verdict(score: f64) -> ToxicityVerdict {
        ToxicityVerdict {
            score,
            attributes: VerdictAttributes::default(),
            fragments: VerdictFragments {
                problematic_words: vec!["useless".to_string()],
                decisive_spans: vec!["you are absolutely useless".to_string()],
            },
            reasoning: "Direct insult aimed at the reader.".to_string(),
            categories: BTreeMap::new(),
        }
    }

    #[test]
    fn test_valid_verdict_passes_through() {
        let input = "Honestly, you are absolutely useless at this.";
        let v = verdict(0.91).validated(input).unwrap();
        assert_eq!(v.fragments.problematic_words, vec!["useless".to_string()]);
        assert_eq!(
            v.fragments.decisive_spans,
            vec!["you are absolutely useless".to_string()]
        );
    }

    #[test]
    fn test_score_out_of_range_is_rejected() {
        let err = verdict(1.2).validated("whatever").unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn test_category_score_out_of_range_is_rejected() {
        let mut v = verdict(0.5);
        v.categories.insert("threat".to_string(), -0.1);
        assert!(v.validated("you are absolutely useless").is_err());
    }

    #[test]
    fn test_foreign_fragments_are_dropped() {
        let v = verdict(0.4).validated("a perfectly pleasant sentence").unwrap();
        assert!(v.fragments.problematic_words.is_empty());
        assert!(v.fragments.decisive_spans.is_empty());
    }

    #[test]
    fn test_max_label_score() {
        let scores = vec![
            LabelScore { label: "toxic".to_string(), score: 0.72 },
            LabelScore { label: "insult".to_string(), score: 0.85 },
            LabelScore { label: "threat".to_string(), score: 0.03 },
        ];
        assert_eq!(max_label_score(&scores), 0.85);
        assert_eq!(max_label_score(&[]), 0.0);
    }
}
