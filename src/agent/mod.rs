//! Model client adapter for executing prompts

pub mod client;
pub mod openrouter;
pub mod response;

use async_trait::async_trait;
use std::sync::Arc;

pub use client::ModelConfig;
pub use openrouter::OpenRouterClient;
pub use response::{AgentResponse, TokenUsage, UpstreamError};

/// One fully-resolved generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Persona framing sent as the system message
    pub system: String,

    /// The task prompt
    pub prompt: String,

    /// Accumulated output of earlier stages, if any
    pub context: Option<String>,
}

impl GenerationRequest {
    /// The user message: the prompt followed by the context section
    pub fn user_message(&self) -> String {
        match &self.context {
            Some(context) if !context.is_empty() => format!(
                "{}\n\nThis is the context you're working with:\n{}",
                self.prompt, context
            ),
            _ => self.prompt.clone(),
        }
    }
}

/// Trait for model execution - allows for different implementations
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate text for a request
    async fn generate(&self, request: &GenerationRequest) -> Result<AgentResponse, UpstreamError>;
}

#[async_trait]
impl<T: ModelClient + ?Sized> ModelClient for Arc<T> {
    async fn generate(&self, request: &GenerationRequest) -> Result<AgentResponse, UpstreamError> {
        (**self).generate(request).await
    }
}
