//! Audit logging for model calls.
//! See ARCHITECTURE.md §4.4

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationAuditEntry {
    pub id: Uuid,
    pub model: String,
    pub backend: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    /// True when this call was a second-stage escalation.
    pub escalated: bool,
    pub output_hash: String,
    pub latency_ms: u64,
    pub called_at: chrono::DateTime<Utc>,
}

impl ModerationAuditEntry {
    pub fn new(
        model: String,
        backend: String,
        prompt_tokens: u32,
        completion_tokens: u32,
        escalated: bool,
        output: &str,
        latency_ms: u64,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(output.as_bytes());
        let output_hash = format!("{:x}", hasher.finalize());

        Self {
            id: Uuid::new_v4(),
            model,
            backend,
            prompt_tokens,
            completion_tokens,
            escalated,
            output_hash,
            latency_ms,
            called_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_hash_is_stable() {
        let a = ModerationAuditEntry::new(
            "llama3.2".into(), "ollama".into(), 120, 48, true, "{\"ok\":true}", 310,
        );
        let b = ModerationAuditEntry::new(
            "llama3.2".into(), "ollama".into(), 120, 48, true, "{\"ok\":true}", 290,
        );
        assert_eq!(a.output_hash, b.output_hash);
        assert_ne!(a.id, b.id);
    }
}
