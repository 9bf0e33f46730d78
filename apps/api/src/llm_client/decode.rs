//! Decoding of structured LLM output.
//!
//! Models wrap JSON in markdown code fences often enough that every
//! structural parse goes through `strip_code_fences` first. Kept as its own
//! step so the fence handling is tested independently of any API call.

use serde::de::DeserializeOwned;

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Unfenced text is returned trimmed and otherwise untouched.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text.strip_prefix("```") else {
        return text;
    };

    // Drop an optional language tag ("json", "JSON", ...) up to the first newline
    let body = match stripped.find('\n') {
        Some(idx) if stripped[..idx].chars().all(|c| c.is_ascii_alphanumeric()) => {
            &stripped[idx + 1..]
        }
        _ => stripped.strip_prefix("json").unwrap_or(stripped),
    };

    let body = body.trim_start();
    body.strip_suffix("```").map(str::trim).unwrap_or(body)
}

/// Strips fences, then parses the remaining text as JSON.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_code_fences(text))
}
