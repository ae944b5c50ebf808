//! Benchmark record schema.
//! See ARCHITECTURE.md §6.1

use serde::{Deserialize, Serialize};

use toxtriage_common::error::{Result, ToxtriageError};

/// Language of a benchmark comment. The curated set covers exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Pl,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Pl => "pl",
        }
    }
}

/// One curated benchmark comment.
///
/// CSV columns, in order: `id`, `text`, `lang`, `expected_score`,
/// `irony`, `profanity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub id: String,
    pub text: String,
    pub lang: Lang,
    /// Curated toxicity expectation in [0, 1].
    pub expected_score: f64,
    /// Raters judged the comment ironic or sarcastic.
    pub irony: bool,
    /// The comment contains profanity.
    pub profanity: bool,
}

impl BenchmarkRecord {
    /// Field-level validation beyond what serde enforces.
    pub fn validate(&self, row: usize) -> Result<()> {
        if !(0.0..=1.0).contains(&self.expected_score) {
            return Err(ToxtriageError::Dataset(format!(
                "row {row} (id {}): expected_score {} outside [0, 1]",
                self.id, self.expected_score
            )));
        }
        if self.text.trim().is_empty() {
            return Err(ToxtriageError::Dataset(format!(
                "row {row} (id {}): empty text",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            id: "c-001".to_string(),
            text: "What a genius move.".to_string(),
            lang: Lang::En,
            expected_score: score,
            irony: true,
            profanity: false,
        }
    }

    #[test]
    fn test_score_bounds() {
        assert!(record(0.0).validate(2).is_ok());
        assert!(record(1.0).validate(2).is_ok());
        assert!(record(1.01).validate(2).is_err());
        assert!(record(-0.2).validate(2).is_err());
    }

    #[test]
    fn test_error_names_the_row() {
        let err = record(2.0).validate(17).unwrap_err();
        assert!(err.to_string().contains("row 17"));
        assert!(err.to_string().contains("c-001"));
    }
}
