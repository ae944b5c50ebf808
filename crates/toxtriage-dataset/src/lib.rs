//! toxtriage-dataset — benchmark dataset loading and evaluation.
//!
//! The benchmark is a flat CSV of curated comments with expected toxicity
//! scores and qualitative flags. Loading validates every record; the
//! evaluation module compares pipeline output against the expectations.

pub mod eval;
pub mod loader;
pub mod record;

pub use eval::{evaluate, EvalSummary};
pub use loader::load_dataset;
pub use record::{BenchmarkRecord, Lang};
