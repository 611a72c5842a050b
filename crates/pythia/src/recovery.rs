//! Recovery of structured interpretations from generated text.
//!
//! Pipeline: validate envelope -> strip markdown fences -> strict parse ->
//! bracket-balancing repair -> fallback. Text-level failures never escape;
//! the worst outcome is a placeholder interpretation that still renders.

use crate::error::InterpretationError;
use crate::gemini::GenerateContentResponse;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SUMMARY_LIMIT: usize = 150;
pub const FALLBACK_SUMMARY: &str = "응답 생성 중 오류 발생";
pub const FALLBACK_ACTION: &str = "다시 시도해주세요";
pub const FALLBACK_KEYWORD: &str = "오류";

const FINISH_STOP: &str = "STOP";
const FINISH_MAX_TOKENS: &str = "MAX_TOKENS";

lazy_static! {
    static ref FENCE_OPEN: Regex = Regex::new(r"(?i)^```(?:json)?\s*\n?").unwrap();
    static ref FENCE_CLOSE: Regex = Regex::new(r"(?i)\n?```\s*$").unwrap();
}

/// Interpretation in the compact `{s, a, k}` shape requested from the model.
///
/// Keys the model omitted stay absent; keys beyond `s`, `a` and `k` are kept
/// in `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interpretation {
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "a", default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    #[serde(rename = "k", default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Interpretation {
    /// Placeholder built from whatever text could not be parsed
    pub fn fallback(stripped: &str) -> Self {
        let summary: String = stripped.chars().take(SUMMARY_LIMIT).collect();
        Self {
            summary: Some(if summary.is_empty() {
                FALLBACK_SUMMARY.to_string()
            } else {
                summary
            }),
            actions: Some(vec![FALLBACK_ACTION.to_string()]),
            keywords: Some(vec![FALLBACK_KEYWORD.to_string()]),
            extra: Map::new(),
        }
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    pub fn actions(&self) -> &[String] {
        self.actions.as_deref().unwrap_or_default()
    }

    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }
}

/// How an interpretation was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryKind {
    /// Parsed as-is after fence stripping
    Direct,
    /// Parsed after the balancing repair
    Repaired,
    /// Neither parse succeeded; placeholder content
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub interpretation: Interpretation,
    pub kind: RecoveryKind,
    /// The response hit the output token limit
    pub truncated: bool,
}

/// Pull the generated text out of a response envelope.
///
/// Requires at least one candidate whose finish reason is absent, `STOP` or
/// `MAX_TOKENS`, with a non-empty first text part.
pub fn extract_text(response: &GenerateContentResponse) -> Result<(&str, bool), InterpretationError> {
    let candidates = response
        .candidates
        .as_ref()
        .ok_or_else(|| InterpretationError::Envelope("missing candidates array.".to_string()))?;
    let candidate = candidates
        .first()
        .ok_or_else(|| InterpretationError::Envelope("no candidates returned.".to_string()))?;

    let truncated = match candidate.finish_reason.as_deref() {
        None | Some(FINISH_STOP) => false,
        Some(FINISH_MAX_TOKENS) => {
            log::warn!("Response was truncated due to MAX_TOKENS limit. Using partial response.");
            true
        }
        Some(other) => {
            return Err(InterpretationError::Envelope(format!(
                "API response finished with reason: {}",
                other
            )))
        }
    };

    let text = candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.first())
        .ok_or_else(|| InterpretationError::Envelope("missing content parts.".to_string()))?
        .text
        .as_deref()
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            InterpretationError::Envelope("missing or invalid text content.".to_string())
        })?;

    Ok((text, truncated))
}

/// Trim and remove a leading ```` ``` ````/```` ```json ```` fence and a trailing fence
pub fn strip_wrapping(text: &str) -> String {
    let trimmed = text.trim();
    let opened = FENCE_OPEN.replace(trimmed, "");
    let closed = FENCE_CLOSE.replace(&opened, "");
    closed.trim().to_string()
}

/// Best-effort balancing of truncated JSON.
///
/// Rule order matters: quote fix, then brace (closing a dangling array
/// first), then a final bracket fix. Counts ignore escaping and string
/// contents.
pub fn repair(text: &str) -> String {
    let mut fixed = text.to_string();

    if fixed.matches('"').count() % 2 != 0 {
        if let Some(last_quote) = fixed.rfind('"') {
            fixed.truncate(last_quote + 1);
        }
    }

    if fixed.matches('{').count() > fixed.matches('}').count() {
        if fixed.matches('[').count() > fixed.matches(']').count() {
            fixed.push(']');
        }
        fixed.push('}');
    }

    if fixed.matches('[').count() > fixed.matches(']').count() {
        fixed.push(']');
    }

    fixed
}

/// Strict parse: the text must be a JSON object of the `{s, a, k}` shape.
/// Arrays are refused even though serde would map them onto fields by position.
fn parse_object(text: &str) -> Result<Interpretation, serde_json::Error> {
    match serde_json::from_str::<Value>(text)? {
        value @ Value::Object(_) => serde_json::from_value(value),
        other => Err(serde::de::Error::custom(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Recover an interpretation from raw generated text. Never fails.
pub fn recover_text(text: &str) -> Recovered {
    let stripped = strip_wrapping(text);

    if let Ok(interpretation) = parse_object(&stripped) {
        return Recovered {
            interpretation,
            kind: RecoveryKind::Direct,
            truncated: false,
        };
    }

    let repaired = repair(&stripped);
    match parse_object(&repaired) {
        Ok(interpretation) => {
            log::warn!("Repaired incomplete JSON response");
            Recovered {
                interpretation,
                kind: RecoveryKind::Repaired,
                truncated: false,
            }
        }
        Err(e) => {
            log::error!("Failed to repair JSON: {}", e);
            Recovered {
                interpretation: Interpretation::fallback(&stripped),
                kind: RecoveryKind::Fallback,
                truncated: false,
            }
        }
    }
}

/// Validate a response envelope and recover its text.
///
/// Envelope problems are errors; anything wrong with the text itself
/// degrades to a fallback.
pub fn recover(response: &GenerateContentResponse) -> Result<Recovered, InterpretationError> {
    let (text, truncated) = extract_text(response)?;
    let mut recovered = recover_text(text);
    recovered.truncated = truncated;
    Ok(recovered)
}
