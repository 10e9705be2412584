//! Fence-stripping JSON normalizer for model output.
//!
//! Only markers at the very start or end of the trimmed text are removed. Commentary
//! before an opening fence is not handled and fails to parse.

use serde_json::Value;
use thiserror::Error;

use crate::models::ResumeData;

const LANG_FENCE: &str = "```json";
const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum MalformedCause {
    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a reply without any text")]
    NoText,
}

/// Model output that could not be read as JSON (or as the résumé schema).
/// Keeps the raw text for diagnostics.
#[derive(Debug, Error)]
#[error("Model output is {cause}")]
pub struct MalformedResponse {
    pub raw: String,
    #[source]
    pub cause: MalformedCause,
}

impl MalformedResponse {
    fn json(raw: &str, source: serde_json::Error) -> Self {
        Self {
            raw: raw.to_string(),
            cause: MalformedCause::Json(source),
        }
    }

    /// The provider answered, but with no text to parse (e.g. a safety block).
    pub fn no_text(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            cause: MalformedCause::NoText,
        }
    }
}

/// Removes a leading ```` ```json ```` or ```` ``` ```` marker and a trailing ```` ``` ````.
pub fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let text = if let Some(rest) = text.strip_prefix(LANG_FENCE) {
        rest
    } else if let Some(rest) = text.strip_prefix(FENCE) {
        rest
    } else {
        text
    };
    let text = text.strip_suffix(FENCE).unwrap_or(text);
    text.trim()
}

/// Strips fences and parses whatever JSON value remains.
pub fn parse_fenced_json(raw: &str) -> Result<Value, MalformedResponse> {
    serde_json::from_str(strip_fences(raw)).map_err(|source| MalformedResponse::json(raw, source))
}

/// Strips fences, parses, and conforms the result to the résumé schema with
/// every absent field filled in.
pub fn normalize_resume(raw: &str) -> Result<ResumeData, MalformedResponse> {
    let value = parse_fenced_json(raw)?;
    let resume: ResumeData =
        serde_json::from_value(value).map_err(|source| MalformedResponse::json(raw, source))?;
    Ok(resume.into_schema())
}
