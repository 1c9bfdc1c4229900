//! Response Parser. Turns an untrusted `RawModelResponse` into a typed result.
//!
//! Stages, in order, each with its own failure:
//! 1. envelope → generated text        (`MalformedEnvelope`)
//! 2. text → JSON value                (`MalformedContent`)
//! 3. JSON value → shape-checked type  (`SchemaViolation`)
//!
//! Partial results are rejected wholesale. Nothing is defaulted or clamped.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::advisory::schema::{self, Shape};
use crate::llm_client::{GenerateContentResponse, LlmError, RawModelResponse};

/// Stage 1: pulls the generated text out of `candidates[0].content.parts[*].text`.
pub fn extract_text(raw: &RawModelResponse) -> Result<String, LlmError> {
    let envelope: GenerateContentResponse = serde_json::from_str(raw.body())
        .map_err(|e| LlmError::MalformedEnvelope(format!("unexpected response body: {e}")))?;

    let candidate = envelope
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedEnvelope("response carried no candidates".to_string()))?;

    let content = candidate.content.ok_or_else(|| {
        LlmError::MalformedEnvelope(format!(
            "candidate carried no content (finishReason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        ))
    })?;

    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(LlmError::MalformedEnvelope(
            "candidate carried no text parts".to_string(),
        ));
    }

    Ok(text)
}

/// Runs all three stages against `shape` and deserializes into `T`.
pub fn parse_structured<T: DeserializeOwned>(
    shape: Shape,
    raw: &RawModelResponse,
) -> Result<T, LlmError> {
    let text = extract_text(raw)?;
    let content = unfence(&text);

    let value: Value = serde_json::from_str(content)
        .map_err(|e| LlmError::MalformedContent(format!("generated text is not valid JSON: {e}")))?;

    schema::validate(shape, &value)?;

    // The shape and `T` agree field for field, so this only trips on a type the
    // shape cannot express (e.g. an unknown enum tag).
    serde_json::from_value(value).map_err(|e| LlmError::SchemaViolation {
        field: "$".to_string(),
        reason: e.to_string(),
    })
}

/// Removes a surrounding markdown fence. The opening fence may carry a
/// language tag in any case (```` ```json ````, ```` ```JSON ````).
fn unfence(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let tag_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let body = if body[..tag_len].eq_ignore_ascii_case("json") || tag_len == 0 {
        &body[tag_len..]
    } else {
        body
    };
    let body = body.trim();
    body.strip_suffix("```").map(str::trim_end).unwrap_or(body)
}
