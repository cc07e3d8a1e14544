//! Pipeline context - run variables and the ordered outputs of finished tasks

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator placed between prior outputs in a context section
const OUTPUT_SEPARATOR: &str = "\n\n----------\n\n";

/// Which prior outputs a task receives as context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextPolicy {
    /// Every earlier output, oldest first
    #[default]
    All,
    /// Only the immediately preceding output
    Previous,
}

/// Output of one finished task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    /// Which task produced it
    pub task_id: String,

    /// Role of the agent that produced it
    pub role: String,

    /// The generated text
    pub content: String,
}

/// Execution context for a pipeline run
///
/// Holds the run variables and the outputs chained from task to task. It is
/// dropped together with the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineContext {
    /// Variables available to description templates (e.g. `topic`)
    pub variables: HashMap<String, String>,

    /// Outputs of completed tasks, in execution order
    pub outputs: Vec<StageOutput>,
}

impl PipelineContext {
    pub fn new(variables: HashMap<String, String>) -> Self {
        Self {
            variables,
            outputs: Vec::new(),
        }
    }

    /// Append the output of a finished task
    pub fn push_output(&mut self, output: StageOutput) {
        self.outputs.push(output);
    }

    /// The prior outputs selected by `policy`
    pub fn prior_outputs(&self, policy: ContextPolicy) -> &[StageOutput] {
        match policy {
            ContextPolicy::All => &self.outputs,
            ContextPolicy::Previous => {
                let start = self.outputs.len().saturating_sub(1);
                &self.outputs[start..]
            }
        }
    }

    /// Render the context section handed to the next task, if there is one
    pub fn render_context(&self, policy: ContextPolicy) -> Option<String> {
        let outputs = self.prior_outputs(policy);
        if outputs.is_empty() {
            return None;
        }

        Some(
            outputs
                .iter()
                .map(|o| format!("## Output of the {} ({})\n\n{}", o.role, o.task_id, o.content))
                .collect::<Vec<_>>()
                .join(OUTPUT_SEPARATOR),
        )
    }
}
