//! Article generation service shared by the web and terminal front ends
//!
//! Validates a request, assembles a fresh pipeline for it and runs it. A
//! request that fails validation never creates a model client.

use crate::{
    agent::{ModelClient, ModelConfig, OpenRouterClient, UpstreamError},
    core::{CrewConfig, Pipeline},
    execution::{ExecutionEngine, ExecutionEvent, PipelineResult},
    settings::Settings,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Problems with a request, detected before any network call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please set the OPENROUTER_API_KEY environment variable.")]
    MissingCredential,

    #[error("Please enter a topic for the article.")]
    EmptyTopic,

    #[error("Unknown model '{0}'. Pick one of the listed models.")]
    UnknownModel(String),
}

/// Everything a generation request can fail with
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Crew configuration error: {0}")]
    Configuration(String),
}

/// A user's request for an article
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: String,

    /// Model identifier; the default model when absent
    #[serde(default)]
    pub model: Option<String>,
}

impl GenerateRequest {
    pub fn new(topic: impl Into<String>, model: Option<String>) -> Self {
        Self {
            topic: topic.into(),
            model,
        }
    }
}

/// Creates the model client for a run
pub trait ClientFactory: Send + Sync {
    fn create(&self, config: Arc<ModelConfig>) -> Result<Arc<dyn ModelClient>, UpstreamError>;
}

/// Factory for the production OpenRouter client
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenRouterFactory;

impl ClientFactory for OpenRouterFactory {
    fn create(&self, config: Arc<ModelConfig>) -> Result<Arc<dyn ModelClient>, UpstreamError> {
        Ok(Arc::new(OpenRouterClient::new(config)?))
    }
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub topic: String,
    pub model: ModelConfig,
}

/// Validates requests and runs the crew for them
#[derive(Clone)]
pub struct ArticleService {
    settings: Arc<Settings>,
    crew: Arc<CrewConfig>,
    factory: Arc<dyn ClientFactory>,
}

impl ArticleService {
    pub fn new(settings: Settings, crew: CrewConfig, factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            settings: Arc::new(settings),
            crew: Arc::new(crew),
            factory,
        }
    }

    /// Service backed by the real OpenRouter client
    pub fn openrouter(settings: Settings, crew: CrewConfig) -> Self {
        Self::new(settings, crew, Arc::new(OpenRouterFactory))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Check credential, topic and model, in that order
    pub fn validate(&self, request: &GenerateRequest) -> Result<ValidatedRequest, ValidationError> {
        if !self.settings.has_credential() {
            return Err(ValidationError::MissingCredential);
        }

        let topic = request.topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }

        let model = request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.settings.default_model());
        if !self.settings.offers_model(model) {
            return Err(ValidationError::UnknownModel(model.to_string()));
        }

        let model = self
            .settings
            .model_config(model)
            .ok_or(ValidationError::MissingCredential)?;

        Ok(ValidatedRequest {
            topic: topic.to_string(),
            model,
        })
    }

    /// Validate the request and run the crew for it
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<PipelineResult, GenerateError> {
        self.generate_observed(request, |_| {}).await
    }

    /// Like [`generate`](Self::generate), reporting progress to `on_event`
    pub async fn generate_observed<F>(
        &self,
        request: &GenerateRequest,
        on_event: F,
    ) -> Result<PipelineResult, GenerateError>
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        let validated = match self.validate(request) {
            Ok(v) => v,
            Err(e) => {
                info!("Rejected generation request: {}", e);
                return Err(e.into());
            }
        };

        let model = Arc::new(validated.model);
        let pipeline = Pipeline::for_topic(&self.crew, Arc::clone(&model), &validated.topic)
            .map_err(|e| GenerateError::Configuration(e.to_string()))?;

        let client = self.factory.create(model)?;
        let engine = ExecutionEngine::new(client).with_event_handler(on_event);

        info!(
            "Generating article on '{}' with {}",
            validated.topic, pipeline.model.model
        );
        engine.run(pipeline).await.map_err(|e| {
            warn!("Article generation failed: {}", e);
            GenerateError::Upstream(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(settings: Settings) -> ArticleService {
        ArticleService::openrouter(settings, CrewConfig::builtin().unwrap())
    }

    #[test]
    fn test_missing_credential_checked_first() {
        let service = service(Settings::default());
        let err = service.validate(&GenerateRequest::new("", None)).unwrap_err();
        assert_eq!(err, ValidationError::MissingCredential);
    }

    #[test]
    fn test_topic_is_trimmed() {
        let service = service(Settings::default().with_api_key("key"));
        let validated = service
            .validate(&GenerateRequest::new("  Solar Power \n", None))
            .unwrap();
        assert_eq!(validated.topic, "Solar Power");
        assert_eq!(validated.model.model, "google/gemini-2.0-pro-exp-02-05:free");
    }

    #[test]
    fn test_unknown_model_rejected() {
        let service = service(Settings::default().with_api_key("key"));
        let err = service
            .validate(&GenerateRequest::new("Tides", Some("acme/model-x".to_string())))
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownModel("acme/model-x".to_string()));
    }

    #[test]
    fn test_blank_model_means_default() {
        let service = service(Settings::default().with_api_key("key"));
        let validated = service
            .validate(&GenerateRequest::new("Tides", Some(" ".to_string())))
            .unwrap();
        assert_eq!(validated.model.model, service.settings().default_model());
    }
}
