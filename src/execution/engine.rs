//! Main execution engine - runs a pipeline's tasks one after another

use crate::{
    agent::{ModelClient, TokenUsage, UpstreamError},
    core::{ExecutionStatus, Pipeline, StageOutput},
    execution::TaskExecutor,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        pipeline_name: String,
        total_tasks: usize,
    },
    TaskStarted {
        task_id: String,
        role: String,
        index: usize,
        total: usize,
    },
    TaskCompleted {
        task_id: String,
        output_chars: usize,
    },
    TaskFailed {
        task_id: String,
        error: String,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Outcome of a successful run: the final task's output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub execution_id: Uuid,
    pub model: String,

    /// Markdown produced by the last task
    pub content: String,

    /// Token usage summed over every task that reported it
    pub usage: TokenUsage,

    pub elapsed_ms: u64,
}

/// Main pipeline execution engine
pub struct ExecutionEngine<C> {
    executor: TaskExecutor<C>,
    event_handlers: Vec<EventHandler>,
}

impl<C: ModelClient> ExecutionEngine<C> {
    pub fn new(client: C) -> Self {
        Self {
            executor: TaskExecutor::new(client),
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn with_event_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
        self
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Run every task in order and return the last task's output
    ///
    /// Takes the pipeline by value: a run cannot be resumed or repeated.
    /// The first `UpstreamError` aborts the run, the remaining tasks never
    /// start and the error is returned unchanged.
    pub async fn run(&self, pipeline: Pipeline) -> Result<PipelineResult, UpstreamError> {
        let started = Instant::now();
        let execution_id = pipeline.execution_id;
        let total = pipeline.tasks.len();

        info!(
            "Starting pipeline execution: {} ({}) with model {}",
            pipeline.name, execution_id, pipeline.model.model
        );
        self.emit_event(ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name: pipeline.name.clone(),
            total_tasks: total,
        });

        let mut context = pipeline.create_context();
        let mut usage = TokenUsage::default();

        for (index, task) in pipeline.tasks.iter().enumerate() {
            self.emit_event(ExecutionEvent::TaskStarted {
                task_id: task.id.clone(),
                role: task.agent.role.clone(),
                index,
                total,
            });

            match self.executor.execute(task, &context, pipeline.context_policy).await {
                Ok(response) => {
                    let output_chars = response.content.chars().count();
                    if let Some(task_usage) = &response.usage {
                        usage.accumulate(task_usage);
                    }

                    context.push_output(StageOutput {
                        task_id: task.id.clone(),
                        role: task.agent.role.clone(),
                        content: response.content,
                    });

                    self.emit_event(ExecutionEvent::TaskCompleted {
                        task_id: task.id.clone(),
                        output_chars,
                    });
                }
                Err(error) => {
                    warn!(
                        "Task {} failed, aborting pipeline {} after {}/{} tasks ({} skipped): {}",
                        task.id,
                        execution_id,
                        index,
                        total,
                        total - index - 1,
                        error
                    );

                    self.emit_event(ExecutionEvent::TaskFailed {
                        task_id: task.id.clone(),
                        error: error.to_string(),
                    });
                    self.emit_event(ExecutionEvent::PipelineCompleted {
                        execution_id,
                        status: ExecutionStatus::Failed,
                    });
                    return Err(error);
                }
            }
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            "Pipeline execution finished: {} ({}) in {}ms",
            pipeline.name, execution_id, elapsed_ms
        );
        self.emit_event(ExecutionEvent::PipelineCompleted {
            execution_id,
            status: ExecutionStatus::Completed,
        });

        // Only the final output leaves the run
        let content = context
            .outputs
            .pop()
            .map(|output| output.content)
            .unwrap_or_default();

        Ok(PipelineResult {
            execution_id,
            model: pipeline.model.model.clone(),
            content,
            usage,
            elapsed_ms,
        })
    }
}
