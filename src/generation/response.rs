use serde::de::DeserializeOwned;
use tracing::debug;

/// Remove Markdown code fences (```json ... ```) that models wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a model reply that is supposed to be JSON. Falls back to the
/// outermost `{..}` or `[..]` block when the model wrapped it in prose.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Option<T> {
    let cleaned = strip_code_fences(text);
    if let Ok(v) = serde_json::from_str(&cleaned) {
        return Some(v);
    }
    let embedded = embedded_json(&cleaned)?;
    match serde_json::from_str(embedded) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!("Reply is not the expected JSON: {}", e);
            None
        }
    }
}

fn embedded_json(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let close = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}
