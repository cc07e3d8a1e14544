//! article-crew - a research, write and edit crew of AI agents behind a web page

pub mod agent;
pub mod cli;
pub mod core;
pub mod execution;
pub mod service;
pub mod settings;
pub mod web;

// Re-export commonly used types
pub use agent::{
    AgentResponse, ModelClient, ModelConfig, OpenRouterClient, TokenUsage, UpstreamError,
};
pub use core::{CrewConfig, ExecutionStatus, Pipeline, PipelineContext};
pub use execution::{ExecutionEngine, ExecutionEvent, PipelineResult};
pub use service::{ArticleService, GenerateError, GenerateRequest, ValidationError};
pub use settings::Settings;
