//! Pipeline domain model

use crate::agent::ModelConfig;
use crate::core::{
    agent::AgentSpec,
    config::CrewConfig,
    context::{ContextPolicy, PipelineContext},
    task::TaskSpec,
};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// One run's worth of agents and tasks
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Crew name
    pub name: String,

    /// The single model configuration every agent of this run refers to
    pub model: Arc<ModelConfig>,

    /// Agents, in crew-file order
    pub agents: Vec<Arc<AgentSpec>>,

    /// Tasks, in execution order
    pub tasks: Vec<TaskSpec>,

    /// Run variables (e.g. `topic`)
    pub variables: HashMap<String, String>,

    /// Which prior outputs each task receives
    pub context_policy: ContextPolicy,

    /// Fresh for every assembled pipeline
    pub execution_id: Uuid,
}

impl Pipeline {
    /// Assemble a fresh pipeline for one run
    pub fn from_config(
        config: &CrewConfig,
        model: Arc<ModelConfig>,
        variables: HashMap<String, String>,
    ) -> Result<Self> {
        let agents: Vec<Arc<AgentSpec>> = config
            .agents
            .iter()
            .map(|a| Arc::new(AgentSpec::from_config(a, Arc::clone(&model))))
            .collect();

        let tasks = config
            .tasks
            .iter()
            .map(|task_config| {
                let agent = agents
                    .iter()
                    .find(|a| a.id == task_config.agent)
                    .cloned()
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Task '{}' is assigned to non-existent agent '{}'",
                            task_config.id,
                            task_config.agent
                        )
                    })?;
                Ok(TaskSpec::from_config(task_config, agent))
            })
            .collect::<Result<Vec<_>>>()?;

        if tasks.is_empty() {
            anyhow::bail!("Crew '{}' defines no tasks", config.name);
        }

        let pipeline = Pipeline {
            name: config.name.clone(),
            model,
            agents,
            tasks,
            variables,
            context_policy: config.context,
            execution_id: Uuid::new_v4(),
        };

        if !pipeline.shares_one_model() {
            anyhow::bail!(
                "Crew '{}' was assembled with more than one model configuration",
                config.name
            );
        }

        Ok(pipeline)
    }

    /// Convenience for the common case of a topic-only run
    pub fn for_topic(config: &CrewConfig, model: Arc<ModelConfig>, topic: &str) -> Result<Self> {
        let mut variables = HashMap::new();
        variables.insert("topic".to_string(), topic.to_string());
        Self::from_config(config, model, variables)
    }

    /// Task IDs in execution order
    pub fn execution_order(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    /// True when every agent and task refers to this run's model configuration
    pub fn shares_one_model(&self) -> bool {
        self.agents.iter().all(|a| Arc::ptr_eq(&a.model, &self.model))
            && self.tasks.iter().all(|t| Arc::ptr_eq(&t.agent.model, &self.model))
    }

    /// Create the execution context for a run of this pipeline
    pub fn create_context(&self) -> PipelineContext {
        PipelineContext::new(self.variables.clone())
    }
}
