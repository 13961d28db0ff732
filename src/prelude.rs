//! Convenience re-exports for common use.

pub use crate::agent::{Agent, ChatSession, Conversation, SessionManager};
pub use crate::config::CiceroneConfig;
pub use crate::error::{CiceroneError, Result};
pub use crate::provider::{create_provider, ModelProvider};
pub use crate::runner::{RunResult, Runner};
pub use crate::surface::ChatSurface;
pub use crate::tools::{FunctionTool, Tool, ToolArguments, ToolParameters};
pub use crate::types::{
    ChatMessage, ContentPart, FinishReason, GenerationSettings, Role, StreamEventType,
    StreamTextResult, TextStreamDelta,
};
