//! Appeal flow: ask the local model to reconsider a contested decision.
//! See ARCHITECTURE.md §5.5

use serde::{Deserialize, Serialize};

use toxtriage_common::error::{Result, ToxtriageError};
use toxtriage_llm::backend::{strip_code_fences, LlmBackend, LlmRequest, ResponseFormat};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconsideration {
    pub new_decision: String,
}

fn prompt(text: &str, was_toxic: bool) -> String {
    let negation = if was_toxic { "" } else { "NOT " };
    format!(
        "You have just analyzed the following text for toxicity levels.\n\
         Text: \"{text}\"\n\
         Your answer was that this text IS {negation}toxic.\n\
         I do not agree with that. Reconsider your decision and justify your new response.\n\
         \n\
         Return a JSON object with this exact field:\n\
         - \"new_decision\": string (Your new reasoning)\n\
         \n\
         Return ONLY JSON."
    )
}

/// Challenge a previous toxic/safe decision and get a fresh justification.
pub async fn reconsider(
    backend: &dyn LlmBackend,
    text: &str,
    was_toxic: bool,
) -> Result<Reconsideration> {
    let resp = backend
        .complete(LlmRequest::user(prompt(text, was_toxic), ResponseFormat::Json))
        .await?;

    serde_json::from_str(strip_code_fences(&resp.content)).map_err(|e| {
        ToxtriageError::Validation(format!("appeal response was not valid JSON: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_states_the_challenged_decision() {
        let p = prompt("that was clever", true);
        assert!(p.contains("IS toxic"));
        let p = prompt("that was clever", false);
        assert!(p.contains("IS NOT toxic"));
    }
}
