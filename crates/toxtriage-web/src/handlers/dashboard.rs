//! Dashboard handler — main landing page with the analyze form and a
//! live event feed fed by /api/events.

use axum::extract::State;
use axum::response::Html;

use crate::state::SharedState;

pub async fn dashboard(State(state): State<SharedState>) -> Html<String> {
    let policy = state.pipeline.policy();
    let cloud_note = if state.cloud.is_some() {
        r#"<span class="badge ok">Cloud path ready</span>"#
    } else {
        r#"<span class="badge off">Cloud path disabled — no API key</span>"#
    };

    Html(format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Toxtriage — Hybrid Toxicity Classifier</title>
    <style>
        body {{ font-family: system-ui, sans-serif; margin: 0; background: #0f1117; color: #e2e4ea; }}
        header {{ padding: 1rem 2rem; border-bottom: 1px solid #262a35; display: flex; justify-content: space-between; align-items: center; }}
        header a {{ color: #8ab4f8; text-decoration: none; margin-left: 1rem; }}
        main {{ max-width: 960px; margin: 0 auto; padding: 2rem; }}
        textarea {{ width: 100%; min-height: 120px; background: #181b24; color: inherit; border: 1px solid #262a35; border-radius: 6px; padding: 0.75rem; box-sizing: border-box; }}
        button {{ margin-top: 0.75rem; padding: 0.5rem 1.25rem; border: 0; border-radius: 6px; background: #2563eb; color: white; cursor: pointer; }}
        .badge {{ padding: 0.15rem 0.6rem; border-radius: 999px; font-size: 0.8rem; }}
        .badge.ok {{ background: rgba(34,197,94,0.15); color: #4ade80; }}
        .badge.off {{ background: rgba(249,115,22,0.15); color: #fb923c; }}
        .muted {{ color: #8b90a0; font-size: 0.9rem; }}
        pre {{ background: #181b24; border: 1px solid #262a35; border-radius: 6px; padding: 1rem; overflow-x: auto; }}
        #events li {{ font-size: 0.85rem; color: #8b90a0; margin-bottom: 0.25rem; }}
    </style>
</head>
<body>
<header>
    <strong>☣️ Toxtriage</strong>
    <nav>{cloud_note}<a href="/system">System</a></nav>
</header>
<main>
    <h2>Analyze content</h2>
    <p class="muted">Each line is scored by the fast six-label classifier; lines above
    the {escalate:.0}% threshold are escalated to the local model for a second opinion.</p>
    <textarea id="texts" placeholder="One text per line, e.g. You are absolutely useless..."></textarea>
    <button onclick="runBatch()">Run hybrid analysis</button>
    <pre id="result">No analysis yet.</pre>

    <h3>Live events</h3>
    <ul id="events"></ul>
</main>
<script>
    async function runBatch() {{
        const texts = document.getElementById('texts').value
            .split('\n').map(t => t.trim()).filter(t => t.length > 0);
        const resp = await fetch('/api/analyze-batch', {{
            method: 'POST',
            headers: {{ 'Content-Type': 'application/json' }},
            body: JSON.stringify({{ texts }}),
        }});
        document.getElementById('result').textContent =
            JSON.stringify(await resp.json(), null, 2);
    }}

    const events = new EventSource('/api/events');
    events.onmessage = (e) => {{
        const li = document.createElement('li');
        li.textContent = e.data;
        const list = document.getElementById('events');
        list.prepend(li);
        while (list.children.length > 20) list.removeChild(list.lastChild);
    }};
</script>
</body>
</html>"#,
        escalate = policy.escalate_threshold * 100.0,
    ))
}
