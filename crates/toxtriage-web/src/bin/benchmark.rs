//! Benchmark runner — drives the local hybrid pipeline over the curated
//! CSV dataset and prints evaluation metrics.
//!
//! Run with: cargo run -p toxtriage-web --bin benchmark

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use toxtriage_dataset::{evaluate, load_dataset};
use toxtriage_llm::backend::OllamaBackend;
use toxtriage_pipeline::{EscalationPolicy, Escalator, HttpClassifier, HybridPipeline};
use toxtriage_web::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load()?;

    let classifier = Arc::new(HttpClassifier::new(config.classifier.base_url.clone()));
    let escalator = Escalator::new(
        Arc::new(OllamaBackend::new(
            config.ollama.base_url.clone(),
            config.ollama.model.clone(),
        )),
        "ollama",
    );
    let policy = EscalationPolicy {
        escalate_threshold: config.pipeline.escalate_threshold,
        flag_threshold: config.pipeline.flag_threshold,
    };
    let pipeline = HybridPipeline::new(classifier, escalator, policy);

    println!("=== Toxtriage benchmark ===");
    let records = load_dataset(Path::new(&config.dataset.path))?;
    let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
    println!("Loaded {} records from {}", records.len(), config.dataset.path);

    let start = Instant::now();
    let (results, audit) = pipeline.analyze_batch(&texts, None).await?;
    println!(
        "Hybrid analysis took: {:.2?} ({} texts, {} escalations)",
        start.elapsed(),
        results.len(),
        audit.len()
    );

    let predicted: Vec<f64> = results.iter().map(|r| r.max_score).collect();
    let summary = evaluate(&records, &predicted, policy.flag_threshold)?;

    println!("Records evaluated:   {}", summary.total);
    println!("Mean absolute error: {:.3}", summary.mean_absolute_error);
    println!("Flag agreement:      {:.1}%", summary.agreement * 100.0);
    for (lang, count) in &summary.by_lang {
        println!("  {lang}: {count} records");
    }

    Ok(())
}
