//! Crew configuration from YAML

use crate::core::context::ContextPolicy;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;

/// The research → write → edit crew shipped with the binary
const BUILTIN_CREW: &str = include_str!("../../crews/article.yaml");

/// Variables a description template may reference
pub const KNOWN_VARIABLES: &[&str] = &["topic"];

/// Matches `{{ name }}` placeholders in description templates
pub(crate) fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// Top-level crew configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewConfig {
    /// Crew name
    pub name: String,

    /// Crew version (optional)
    #[serde(default)]
    pub version: Option<String>,

    /// Which prior outputs each task receives
    #[serde(default)]
    pub context: ContextPolicy,

    /// Agent personas
    pub agents: Vec<AgentConfig>,

    /// Tasks, executed in the order listed
    pub tasks: Vec<TaskConfig>,
}

/// Agent persona as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Unique agent identifier referenced by tasks
    pub id: String,

    /// Role name, e.g. "Researcher"
    pub role: String,

    /// What the agent is trying to achieve
    pub goal: String,

    /// Persona background
    pub backstory: String,

    /// Informational only; no agent delegates work
    #[serde(default)]
    pub allow_delegation: bool,
}

/// Task as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Unique task identifier
    pub id: String,

    /// ID of the agent that performs this task
    pub agent: String,

    /// Description template; may reference `{{ topic }}`
    pub description: String,

    /// Description of the expected result
    pub expected_output: String,
}

impl CrewConfig {
    /// The built-in article crew
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CREW).context("Built-in crew definition is invalid")
    }

    /// Load crew configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read crew file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse crew configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: CrewConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the crew configuration
    pub fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            anyhow::bail!("Crew '{}' defines no tasks", self.name);
        }

        let mut agent_ids = HashSet::new();
        for agent in &self.agents {
            if !agent_ids.insert(agent.id.as_str()) {
                anyhow::bail!("Duplicate agent ID: {}", agent.id);
            }
            if agent.role.trim().is_empty() {
                anyhow::bail!("Agent '{}' has an empty role", agent.id);
            }
            if agent.allow_delegation {
                warn!(
                    "Agent '{}' sets allow_delegation; delegation is not supported, ignoring",
                    agent.id
                );
            }
        }

        let mut task_ids = HashSet::new();
        for task in &self.tasks {
            if !task_ids.insert(task.id.as_str()) {
                anyhow::bail!("Duplicate task ID: {}", task.id);
            }
            if !agent_ids.contains(task.agent.as_str()) {
                anyhow::bail!(
                    "Task '{}' is assigned to non-existent agent '{}'",
                    task.id,
                    task.agent
                );
            }
            if task.description.trim().is_empty() {
                anyhow::bail!("Task '{}' has an empty description", task.id);
            }

            for caps in placeholder_regex().captures_iter(&task.description) {
                let name = &caps[1];
                if !KNOWN_VARIABLES.contains(&name) {
                    anyhow::bail!(
                        "Task '{}' references unknown variable '{}'",
                        task.id,
                        name
                    );
                }
            }
        }

        Ok(())
    }
}
