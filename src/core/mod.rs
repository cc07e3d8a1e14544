//! Core domain models for the crew
//!
//! This module defines the agents, tasks and pipeline assembled for each
//! run, plus the crew configuration they are built from.

pub mod agent;
pub mod config;
pub mod context;
pub mod pipeline;
pub mod state;
pub mod task;

pub use agent::AgentSpec;
pub use config::CrewConfig;
pub use context::{ContextPolicy, PipelineContext, StageOutput};
pub use pipeline::Pipeline;
pub use state::ExecutionStatus;
pub use task::TaskSpec;
