//! Model provider trait and the OpenAI-compatible implementation.

pub mod http;
pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::CiceroneConfig;
use crate::error::CiceroneError;
use crate::types::{ChatMessage, FinishReason, GenerationSettings, TextStreamDelta, ToolCall};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate a complete response (non-streaming).
    async fn generate(&self, request: &ChatRequest) -> Result<ChatResponse, CiceroneError>;

    /// Generate a response as an ordered, single-pass delta stream.
    async fn stream(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, CiceroneError>>, CiceroneError>;
}

/// Create the provider for the configured endpoint.
///
/// Fails with `Authentication` when no API key is configured, so the
/// missing-credential case is reported before the first network call.
pub fn create_provider(
    config: &CiceroneConfig,
) -> Result<Box<dyn ModelProvider>, CiceroneError> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| CiceroneError::Authentication("Missing GEMINI_API_KEY".into()))?;
    Ok(Box::new(
        openai_compat::OpenAiCompatProvider::new(
            config.model.clone(),
            api_key,
            config.base_url.clone(),
        )
        .with_timeout(config.request_timeout),
    ))
}
