//! Fast six-label classifier client.
//! See ARCHITECTURE.md §5.1
//!
//! The first moderation stage is a lightweight text classifier served
//! next to this process. One POST scores a whole batch; the response is
//! one `[{label, score}]` array per input text, in input order.

use async_trait::async_trait;
use serde::Serialize;

use toxtriage_common::error::{Result, ToxtriageError};
use toxtriage_common::report::LabelScore;

/// Labels the fast classifier scores, in its native order.
pub const CLASSIFIER_LABELS: [&str; 6] =
    ["toxic", "severe_toxic", "obscene", "threat", "insult", "identity_hate"];

#[async_trait]
pub trait FastClassifier: Send + Sync {
    /// Score every text. The result has one entry per input, same order.
    async fn classify(&self, texts: &[String]) -> Result<Vec<Vec<LabelScore>>>;
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    texts: &'a [String],
}

/// Client for the local classifier server.
pub struct HttpClassifier {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClassifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }

    /// Quick reachability probe for health reporting.
    pub async fn is_reachable(&self) -> bool {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl FastClassifier for HttpClassifier {
    async fn classify(&self, texts: &[String]) -> Result<Vec<Vec<LabelScore>>> {
        let url = format!("{}/classify", self.base_url.trim_end_matches('/'));
        let scores: Vec<Vec<LabelScore>> = self.client
            .post(&url)
            .json(&ClassifyRequest { texts })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if scores.len() != texts.len() {
            return Err(ToxtriageError::Pipeline(format!(
                "classifier returned {} score sets for {} texts",
                scores.len(),
                texts.len()
            )));
        }
        Ok(scores)
    }
}
