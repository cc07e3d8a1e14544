//! Task domain model

use crate::agent::GenerationRequest;
use crate::core::{
    agent::AgentSpec,
    config::{placeholder_regex, TaskConfig},
};
use regex::Captures;
use std::collections::HashMap;
use std::sync::Arc;

/// A single unit of generation work assigned to one agent
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Unique task identifier
    pub id: String,

    /// Description template; `{{ name }}` placeholders are filled per run
    pub description_template: String,

    /// What the result should look like
    pub expected_output: String,

    /// The agent performing this task
    pub agent: Arc<AgentSpec>,
}

impl TaskSpec {
    /// Create a task from its config, assigned to `agent`
    pub fn from_config(config: &TaskConfig, agent: Arc<AgentSpec>) -> Self {
        Self {
            id: config.id.clone(),
            description_template: config.description.clone(),
            expected_output: config.expected_output.clone(),
            agent,
        }
    }

    /// Render the description with variable substitution
    ///
    /// Placeholders without a matching variable are left untouched.
    pub fn render_description(&self, variables: &HashMap<String, String>) -> String {
        placeholder_regex()
            .replace_all(&self.description_template, |caps: &Captures| {
                variables
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Build the task prompt: description plus expected-output criteria
    pub fn build_prompt(&self, variables: &HashMap<String, String>) -> String {
        format!(
            "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            self.render_description(variables).trim_end(),
            self.expected_output
        )
    }

    /// Build the full request for this task's agent
    pub fn build_request(
        &self,
        variables: &HashMap<String, String>,
        context: Option<String>,
    ) -> GenerationRequest {
        GenerationRequest {
            system: self.agent.system_prompt(),
            prompt: self.build_prompt(variables),
            context,
        }
    }
}
