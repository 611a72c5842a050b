use crate::error::InterpretationError;
use crate::gemini::types::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use reqwest::Client;

/// A single `generateContent` round trip.
///
/// Implementations perform exactly one call: no retries, no timeouts of their
/// own. Dropping the returned future abandons the request.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, InterpretationError>;
}

/// HTTP backend for the Gemini REST API
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `{base}/models/{model}:generateContent`, without the key
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl GenerativeBackend for HttpBackend {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, InterpretationError> {
        let endpoint = self.endpoint(model);
        log::debug!("POST {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| InterpretationError::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(InterpretationError::Transport {
                status: Some(status.as_u16()),
                message: format!(
                    "{}. {}",
                    status.canonical_reason().unwrap_or("Unknown status"),
                    error_text
                ),
            });
        }

        let body: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| InterpretationError::Transport {
                    status: Some(status.as_u16()),
                    message: format!("Failed to decode response body: {}", e.without_url()),
                })?;

        if let Some(error) = &body.error {
            let message = match &error.message {
                Some(message) => message.clone(),
                None => serde_json::to_string(error).unwrap_or_default(),
            };
            return Err(InterpretationError::Api {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(body)
    }
}
