use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model and generation parameters for the interpretation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeminiConfig {
    pub model: String,
    #[serde(alias = "base_url")]
    pub base_url: String,
    pub temperature: f32,
    #[serde(alias = "top_k")]
    pub top_k: u32,
    #[serde(alias = "top_p")]
    pub top_p: f32,
    /// Large enough that a complete answer rarely hits the limit
    #[serde(alias = "max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

/// API credentials. The key is never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        Self {
            api_key: if key.trim().is_empty() { None } else { Some(key) },
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Read `GEMINI_API_KEY` from the environment
    pub fn from_env() -> Self {
        std::env::var(API_KEY_ENV).map(Self::new).unwrap_or_default()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_not_configured() {
        assert!(!Credentials::new("   ").is_configured());
        assert!(Credentials::new("abc").is_configured());
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new("secret-key");
        assert!(!format!("{:?}", creds).contains("secret-key"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GeminiConfig = serde_json::from_str(r#"{"model":"gemini-2.0-flash","topK":20}"#).unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.top_k, 20);
        assert_eq!(config.max_output_tokens, 1024);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
