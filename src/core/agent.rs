//! Agent persona domain model

use crate::agent::ModelConfig;
use crate::core::config::AgentConfig;
use std::sync::Arc;

/// A named persona bound to the run's model configuration
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub id: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub allow_delegation: bool,

    /// Shared with every other agent of the same run
    pub model: Arc<ModelConfig>,
}

impl AgentSpec {
    /// Create an agent from its config, bound to `model`
    pub fn from_config(config: &AgentConfig, model: Arc<ModelConfig>) -> Self {
        Self {
            id: config.id.clone(),
            role: config.role.clone(),
            goal: config.goal.clone(),
            backstory: config.backstory.clone(),
            allow_delegation: config.allow_delegation,
            model,
        }
    }

    /// Persona framing sent as the system message for this agent's tasks
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}
