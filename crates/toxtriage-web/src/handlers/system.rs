//! System page and audit API — which backends ran, with what token
//! spend and latency.

use axum::extract::{Json, State};
use axum::response::Html;

use toxtriage_llm::audit::ModerationAuditEntry;

use crate::state::SharedState;

/// GET /api/audit — retained audit entries, newest last.
pub async fn api_audit(State(state): State<SharedState>) -> Json<Vec<ModerationAuditEntry>> {
    Json(state.audit_snapshot())
}

/// GET /system
pub async fn system_page(State(state): State<SharedState>) -> Html<String> {
    let entries = state.audit_snapshot();
    let total_calls = entries.len();
    let escalations = entries.iter().filter(|e| e.escalated).count();

    let rows: String = if entries.is_empty() {
        r#"<tr><td colspan="6" class="muted">No model invocations recorded yet.</td></tr>"#
            .to_string()
    } else {
        entries.iter().rev().map(|e| {
            let kind = if e.escalated { "escalation" } else { "verdict" };
            format!(
                r#"<tr>
                <td>{}</td>
                <td>{}</td>
                <td>{}</td>
                <td class="num">{}</td>
                <td class="num">{}</td>
                <td class="num">{} ms</td>
            </tr>"#,
                e.model, e.backend, kind, e.prompt_tokens, e.completion_tokens, e.latency_ms
            )
        }).collect()
    };

    Html(format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>System — Toxtriage</title>
    <style>
        body {{ font-family: system-ui, sans-serif; margin: 0; background: #0f1117; color: #e2e4ea; }}
        header {{ padding: 1rem 2rem; border-bottom: 1px solid #262a35; }}
        header a {{ color: #8ab4f8; text-decoration: none; }}
        main {{ max-width: 960px; margin: 0 auto; padding: 2rem; }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #262a35; }}
        .num {{ text-align: right; font-variant-numeric: tabular-nums; }}
        .muted {{ color: #8b90a0; }}
    </style>
</head>
<body>
<header><strong>☣️ Toxtriage</strong> · <a href="/">Dashboard</a></header>
<main>
    <h2>Model invocations</h2>
    <p class="muted">{total_calls} calls retained, {escalations} escalations.</p>
    <table>
        <thead>
            <tr><th>Model</th><th>Backend</th><th>Kind</th>
                <th class="num">Prompt tok</th><th class="num">Completion tok</th><th class="num">Latency</th></tr>
        </thead>
        <tbody>{rows}</tbody>
    </table>
</main>
</body>
</html>"#))
}
