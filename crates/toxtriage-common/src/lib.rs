//! toxtriage-common — Shared types and errors used across all Toxtriage crates.

pub mod error;
pub mod report;

// Re-export commonly used types
pub use report::{
    Band, EscalationAnalysis, LabelScore, ToxicityVerdict, VerdictAttributes, VerdictFragments,
};
