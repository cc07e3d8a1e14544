//! Process-wide settings resolved once at startup

use crate::agent::client::{
    DEFAULT_BASE_URL, DEFAULT_REFERER, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, DEFAULT_TITLE,
};
use crate::agent::ModelConfig;

/// Models offered in the selector; the first one is the default
pub const MODEL_OPTIONS: &[&str] = &[
    "google/gemini-2.0-pro-exp-02-05:free",
    "openai/gpt-3.5-turbo",
    "openai/gpt-4",
    "anthropic/claude-2",
    "google/gemini-pro",
    "meta-llama/llama-2-70b-chat",
    "mistralai/mistral-medium",
];

/// Provider settings shared by every run
///
/// Built from CLI flags and environment in `main` and passed down
/// explicitly; nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Provider credential; `None` is reported when a run is triggered
    pub api_key: Option<String>,
    pub base_url: String,
    pub models: Vec<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub referer: String,
    pub title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            models: MODEL_OPTIONS.iter().map(|m| m.to_string()).collect(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Settings {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// True when a non-blank credential is configured
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// The model preselected in the selector
    pub fn default_model(&self) -> &str {
        self.models.first().map(String::as_str).unwrap_or(MODEL_OPTIONS[0])
    }

    /// Whether `model` is one of the offered models
    pub fn offers_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    /// Build the model configuration for one run
    ///
    /// Returns `None` when no credential is configured.
    pub fn model_config(&self, model: &str) -> Option<ModelConfig> {
        let api_key = self.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        Some(
            ModelConfig::new(api_key.trim(), model)
                .with_base_url(self.base_url.clone())
                .with_temperature(self.temperature)
                .with_timeout(self.timeout_secs)
                .with_identity(self.referer.clone(), self.title.clone()),
        )
    }
}
