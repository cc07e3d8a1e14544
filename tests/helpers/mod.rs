//! Test doubles for the model client

#![allow(dead_code)]

use article_crew::agent::{GenerationRequest, ModelClient, ModelConfig};
use article_crew::service::ClientFactory;
use article_crew::{AgentResponse, ArticleService, CrewConfig, Settings, UpstreamError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Model client that answers from a script and records every request
pub struct StubClient {
    responses: Vec<Result<String, UpstreamError>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Option<Duration>,
}

impl StubClient {
    pub fn new(responses: Vec<Result<String, UpstreamError>>) -> Self {
        Self {
            responses,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Three successful stages with recognizable outputs
    pub fn three_stages() -> Self {
        Self::new(vec![
            Ok("research notes".to_string()),
            Ok("draft article".to_string()),
            Ok("# Final Article\n\nPolished text.".to_string()),
        ])
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for StubClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<AgentResponse, UpstreamError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.responses.get(index) {
            Some(Ok(content)) => Ok(AgentResponse::new(content.clone())),
            Some(Err(e)) => Err(e.clone()),
            None => Err(UpstreamError::Network(format!(
                "no scripted response for call {}",
                index + 1
            ))),
        }
    }
}

/// Factory handing out one shared stub and counting how often it was asked
pub struct CountingFactory {
    pub client: Arc<StubClient>,
    creates: AtomicUsize,
    configs: Mutex<Vec<Arc<ModelConfig>>>,
}

impl CountingFactory {
    pub fn new(client: StubClient) -> Self {
        Self {
            client: Arc::new(client),
            creates: AtomicUsize::new(0),
            configs: Mutex::new(Vec::new()),
        }
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn configs(&self) -> Vec<Arc<ModelConfig>> {
        self.configs.lock().unwrap().clone()
    }
}

impl ClientFactory for CountingFactory {
    fn create(&self, config: Arc<ModelConfig>) -> Result<Arc<dyn ModelClient>, UpstreamError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.configs.lock().unwrap().push(config);
        let client: Arc<dyn ModelClient> = self.client.clone();
        Ok(client)
    }
}

pub fn settings_with_key() -> Settings {
    Settings::default().with_api_key("sk-or-test")
}

/// Service over the built-in crew and the given factory
pub fn service(settings: Settings, factory: Arc<CountingFactory>) -> ArticleService {
    ArticleService::new(settings, CrewConfig::builtin().unwrap(), factory)
}
