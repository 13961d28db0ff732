//! Process-wide configuration, loaded once at startup.

use std::time::Duration;

/// Default endpoint: Gemini's OpenAI-compatible surface.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the model endpoint and outbound calls.
///
/// Read-only after construction. A missing API key is not an error here;
/// it surfaces as an `Authentication` error when a provider is created,
/// so library users can still construct agents and sessions offline.
#[derive(Debug, Clone)]
pub struct CiceroneConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for CiceroneConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CiceroneConfig {
    /// Load from environment variables (`GEMINI_API_KEY`, `CICERONE_MODEL`,
    /// `CICERONE_BASE_URL`, `CICERONE_TIMEOUT_SECS`), reading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok();

        let model = std::env::var("CICERONE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            std::env::var("CICERONE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout = std::env::var("CICERONE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self {
            api_key,
            model,
            base_url,
            request_timeout,
        }
    }

    /// Override the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Whether credentials are configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
