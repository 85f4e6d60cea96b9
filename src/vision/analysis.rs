//! Rendering of vision model responses.
//!
//! Models asked for JSON wrap it in a ```json fence, usually with prose
//! around it. The fence is located and its contents pretty-printed; a
//! response without a fence is printed as-is.

use anyhow::{Context, Result};

/// Locate a ```json fenced block and return its inner text.
pub fn extract_fenced_json(text: &str) -> Option<&str> {
    let start = text.find("```json")?;
    let inner = &text[start + "```json".len()..];
    let end = inner.find("```")?;

    Some(inner[..end].trim())
}

/// Format a model response for console output.
///
/// A fenced JSON block is parsed and pretty-printed. Malformed fenced
/// content is a parse error that propagates to the caller.
///
/// # Errors
/// Returns an error if a fenced block is present but not valid JSON.
pub fn format_response(text: &str) -> Result<String> {
    match extract_fenced_json(text) {
        Some(inner) => {
            let value: serde_json::Value = serde_json::from_str(inner).context("Response contained a malformed JSON block")?;
            serde_json::to_string_pretty(&value).context("Failed to render JSON response")
        }
        None => Ok(text.to_string()),
    }
}
