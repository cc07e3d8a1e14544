//! Model client configuration

/// Default OpenRouter API endpoint
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Sampling temperature used for every stage unless overridden
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Upper bound for a single chat-completion call
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Value sent in the `HTTP-Referer` identification header
pub const DEFAULT_REFERER: &str = "https://github.com/your-repo";

/// Value sent in the `X-Title` identification header
pub const DEFAULT_TITLE: &str = "Multi Agent AI Researcher";

/// Configuration for one pipeline run's model backend.
///
/// Built once per run and shared by reference with every agent of that run.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Base URL of the chat-completion API (without `/chat/completions`)
    pub base_url: String,

    /// Bearer credential
    pub api_key: String,

    /// Provider model identifier, e.g. `openai/gpt-4`
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Timeout for a single model call in seconds
    pub timeout_secs: u64,

    /// Caller identification sent as `HTTP-Referer`
    pub referer: String,

    /// Caller identification sent as `X-Title`
    pub title: String,
}

impl ModelConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_identity(mut self, referer: impl Into<String>, title: impl Into<String>) -> Self {
        self.referer = referer.into();
        self.title = title.into();
        self
    }

    /// Full URL of the chat-completion endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// The API key with everything but the edges hidden, safe for logs
    pub fn api_key_masked(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_builder() {
        let config = ModelConfig::new("sk-test", "openai/gpt-4")
            .with_base_url("http://localhost:8080/v1/")
            .with_temperature(0.2)
            .with_timeout(30);

        assert_eq!(config.model, "openai/gpt-4");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_defaults() {
        let config = ModelConfig::new("k", "m");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_api_key_masking() {
        assert_eq!(ModelConfig::new("abc", "m").api_key_masked(), "***");
        assert_eq!(
            ModelConfig::new("sk-1234567890abcdef", "m").api_key_masked(),
            "sk-1...cdef"
        );
    }
}
