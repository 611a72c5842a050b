use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the interpretation client.
///
/// Malformed generated text is not an error: it degrades to a fallback
/// interpretation inside [`crate::recovery`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpretationError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Missing {0} environment variable.")]
    MissingCredentials(&'static str),
    #[error("Gemini API request failed: {}{message}", status_prefix(.status))]
    Transport { status: Option<u16>, message: String },
    #[error("Gemini API error: {message}")]
    Api { status: Option<u16>, message: String },
    #[error("Invalid API response: {0}")]
    Envelope(String),
}

fn status_prefix(status: &Option<u16>) -> String {
    status.map(|s| format!("{} ", s)).unwrap_or_default()
}

impl InterpretationError {
    /// HTTP status associated with the failure, if any
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } | Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// Serialized failure: `{success: false, error: true, message, details}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationFailure {
    pub success: bool,
    pub error: bool,
    pub message: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
}

impl From<&InterpretationError> for InterpretationFailure {
    fn from(err: &InterpretationError) -> Self {
        Self {
            success: false,
            error: true,
            message: err.to_string(),
            details: format!("{:?}", err),
            http_status: err.http_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_includes_status() {
        let err = InterpretationError::Transport {
            status: Some(429),
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini API request failed: 429 quota exceeded");
        assert_eq!(err.http_status(), Some(429));
    }

    #[test]
    fn test_failure_payload() {
        let err = InterpretationError::MissingCredentials("GEMINI_API_KEY");
        let payload = serde_json::to_value(InterpretationFailure::from(&err)).unwrap();
        assert_eq!(payload["success"], false);
        assert_eq!(payload["error"], true);
        assert_eq!(payload["message"], "Missing GEMINI_API_KEY environment variable.");
        assert!(payload.get("httpStatus").is_none());
    }
}
