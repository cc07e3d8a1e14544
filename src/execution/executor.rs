//! Task executor - runs individual tasks against the model client

use crate::{
    agent::{AgentResponse, ModelClient, UpstreamError},
    core::{ContextPolicy, PipelineContext, TaskSpec},
};
use tokio::time::{timeout, Duration};
use tracing::{debug, error, info};

/// Executes a single task
pub struct TaskExecutor<C> {
    client: C,
}

impl<C: ModelClient> TaskExecutor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Execute a task with the prior outputs selected by `policy` as context
    ///
    /// The call is bounded by the run's timeout; expiry is reported as
    /// `UpstreamError::Timeout`.
    pub async fn execute(
        &self,
        task: &TaskSpec,
        context: &PipelineContext,
        policy: ContextPolicy,
    ) -> Result<AgentResponse, UpstreamError> {
        info!("Executing task: {} ({})", task.id, task.agent.role);

        let request = task.build_request(&context.variables, context.render_context(policy));
        debug!(
            "Prompt for task {}: {} chars, context {} chars",
            task.id,
            request.prompt.len(),
            request.context.as_ref().map_or(0, |c| c.len())
        );

        let timeout_secs = task.agent.model.timeout_secs;
        match timeout(Duration::from_secs(timeout_secs), self.client.generate(&request)).await {
            Ok(Ok(response)) => {
                debug!("Model response for task {}: {} chars", task.id, response.content.len());
                Ok(response)
            }
            Ok(Err(e)) => {
                error!("Model error for task {}: {}", task.id, e);
                Err(e)
            }
            Err(_) => {
                error!("Timeout for task {} after {}s", task.id, timeout_secs);
                Err(UpstreamError::Timeout(timeout_secs))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{GenerationRequest, ModelConfig};
    use crate::core::{CrewConfig, Pipeline, StageOutput};
    use std::sync::{Arc, Mutex};

    struct RecordingClient {
        response: Result<String, UpstreamError>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait::async_trait]
    impl ModelClient for RecordingClient {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<AgentResponse, UpstreamError> {
            self.seen.lock().unwrap().push(request.clone());
            self.response.clone().map(AgentResponse::new)
        }
    }

    struct SlowClient;

    #[async_trait::async_trait]
    impl ModelClient for SlowClient {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<AgentResponse, UpstreamError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(AgentResponse::new("too late"))
        }
    }

    fn pipeline(timeout_secs: u64) -> Pipeline {
        let crew = CrewConfig::builtin().unwrap();
        let model = Arc::new(ModelConfig::new("key", "m").with_timeout(timeout_secs));
        Pipeline::for_topic(&crew, model, "Solar Power").unwrap()
    }

    #[tokio::test]
    async fn test_task_receives_prior_outputs() {
        let pipeline = pipeline(60);
        let mut context = pipeline.create_context();
        context.push_output(StageOutput {
            task_id: "research".to_string(),
            role: "Researcher".to_string(),
            content: "Solar facts".to_string(),
        });

        let client = RecordingClient {
            response: Ok("Draft".to_string()),
            seen: Mutex::new(Vec::new()),
        };
        let executor = TaskExecutor::new(client);

        let response = executor
            .execute(&pipeline.tasks[1], &context, ContextPolicy::All)
            .await
            .unwrap();
        assert_eq!(response.content, "Draft");

        let seen = executor.client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].system.starts_with("You are Writer."));
        assert!(seen[0].context.as_deref().unwrap().contains("Solar facts"));
    }

    #[tokio::test]
    async fn test_first_task_has_no_context() {
        let pipeline = pipeline(60);
        let context = pipeline.create_context();
        let client = RecordingClient {
            response: Ok("Facts".to_string()),
            seen: Mutex::new(Vec::new()),
        };
        let executor = TaskExecutor::new(client);

        executor
            .execute(&pipeline.tasks[0], &context, ContextPolicy::All)
            .await
            .unwrap();

        let seen = executor.client.seen.lock().unwrap();
        assert!(seen[0].context.is_none());
        assert!(seen[0].prompt.contains("Solar Power"));
    }

    #[tokio::test]
    async fn test_upstream_error_passes_through() {
        let pipeline = pipeline(60);
        let client = RecordingClient {
            response: Err(UpstreamError::RateLimited("slow down".to_string())),
            seen: Mutex::new(Vec::new()),
        };
        let executor = TaskExecutor::new(client);

        let err = executor
            .execute(&pipeline.tasks[0], &pipeline.create_context(), ContextPolicy::All)
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamError::RateLimited("slow down".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_upstream_error() {
        let pipeline = pipeline(5);
        let executor = TaskExecutor::new(SlowClient);

        let err = executor
            .execute(&pipeline.tasks[0], &pipeline.create_context(), ContextPolicy::All)
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamError::Timeout(5));
    }
}
