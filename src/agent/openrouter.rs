//! OpenRouter chat-completion client

use crate::agent::{
    AgentResponse, GenerationRequest, ModelClient, ModelConfig, TokenUsage, UpstreamError,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for an OpenRouter-compatible `/chat/completions` endpoint
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    /// HTTP client for making API requests
    client: Client,

    /// Configuration of the run this client belongs to
    config: Arc<ModelConfig>,
}

impl OpenRouterClient {
    /// Create a client for one run's model configuration
    ///
    /// # Errors
    /// Returns `UpstreamError::Network` if the HTTP client cannot be built
    /// (e.g. TLS backend initialisation failure).
    pub fn new(config: Arc<ModelConfig>) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn build_body(&self, request: &GenerationRequest) -> ApiRequest {
        ApiRequest {
            model: self.config.model.clone(),
            messages: vec![
                ApiMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ApiMessage {
                    role: "user".to_string(),
                    content: request.user_message(),
                },
            ],
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl ModelClient for OpenRouterClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<AgentResponse, UpstreamError> {
        let url = self.config.completions_url();
        let body = self.build_body(request);

        debug!(
            model = %self.config.model,
            api_key = %self.config.api_key_masked(),
            prompt_len = request.prompt.len(),
            "Sending chat completion request"
        );

        let http_response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout(self.config.timeout_secs)
                } else {
                    UpstreamError::Network(e.to_string())
                }
            })?;

        let status = http_response.status();

        if !status.is_success() {
            let error_text = http_response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());

            // Prefer the provider's structured message when there is one
            let message = serde_json::from_str::<ApiErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            warn!(status = status.as_u16(), "Model provider returned an error: {}", message);
            return Err(UpstreamError::from_status(status.as_u16(), message));
        }

        let text = http_response
            .text()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let api_response: ApiResponse = serde_json::from_str(&text)
            .map_err(|e| {
                UpstreamError::MalformedResponse(format!("Failed to parse API response: {}", e))
            })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                UpstreamError::MalformedResponse("Response contained no content".to_string())
            })?;

        debug!("Model returned {} bytes", content.len());

        Ok(AgentResponse {
            content,
            usage: api_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_layout() {
        let config = Arc::new(ModelConfig::new("key", "openai/gpt-4").with_temperature(0.5));
        let client = OpenRouterClient::new(config).unwrap();

        let body = client.build_body(&GenerationRequest {
            system: "You are Writer.".to_string(),
            prompt: "Write".to_string(),
            context: Some("research notes".to_string()),
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "openai/gpt-4");
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "You are Writer.");
        assert_eq!(json["messages"][1]["role"], "user");
        assert!(json["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("research notes"));
    }

    #[test]
    fn test_response_without_usage_parses() {
        let parsed: ApiResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#)
                .unwrap();
        assert!(parsed.usage.is_none());
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hi"));
    }
}
