//! toxtriage-pipeline — the two moderation paths.
//!
//! The cloud path sends a fixed instruction template to Gemini in
//! structured-JSON mode and validates the returned verdict. The local
//! hybrid path scores a batch against a lightweight six-label classifier
//! and escalates suspicious texts to an Ollama-served model for a
//! contextual second opinion. See ARCHITECTURE.md §5.

pub mod appeal;
pub mod classifier;
pub mod cloud;
pub mod escalate;
pub mod hybrid;

pub use classifier::{FastClassifier, HttpClassifier, CLASSIFIER_LABELS};
pub use cloud::CloudAnalyzer;
pub use escalate::{EscalationPolicy, Escalator};
pub use hybrid::{HybridPipeline, TextAnalysis};
