//! Benchmark evaluation metrics.
//! See ARCHITECTURE.md §6.3

use std::collections::BTreeMap;

use serde::Serialize;

use toxtriage_common::error::{Result, ToxtriageError};

use crate::record::BenchmarkRecord;

/// Aggregate comparison of pipeline scores against curated expectations.
#[derive(Debug, Clone, Serialize)]
pub struct EvalSummary {
    pub total: usize,
    /// Mean |predicted − expected| over all records.
    pub mean_absolute_error: f64,
    /// Fraction of records where predicted and expected fall on the same
    /// side of the flag threshold.
    pub agreement: f64,
    /// Record counts per language tag.
    pub by_lang: BTreeMap<String, usize>,
}

/// Compare predictions (one per record, same order) with expectations.
pub fn evaluate(
    records: &[BenchmarkRecord],
    predicted: &[f64],
    flag_threshold: f64,
) -> Result<EvalSummary> {
    if records.len() != predicted.len() {
        return Err(ToxtriageError::Dataset(format!(
            "{} predictions for {} records",
            predicted.len(),
            records.len()
        )));
    }

    let mut by_lang: BTreeMap<String, usize> = BTreeMap::new();
    let mut abs_error_sum = 0.0;
    let mut agreements = 0usize;

    for (record, &score) in records.iter().zip(predicted) {
        abs_error_sum += (score - record.expected_score).abs();
        if (score > flag_threshold) == (record.expected_score > flag_threshold) {
            agreements += 1;
        }
        *by_lang.entry(record.lang.as_str().to_string()).or_insert(0) += 1;
    }

    let total = records.len();
    Ok(EvalSummary {
        total,
        mean_absolute_error: if total == 0 { 0.0 } else { abs_error_sum / total as f64 },
        agreement: if total == 0 { 0.0 } else { agreements as f64 / total as f64 },
        by_lang,
    })
}
