//! Streaming types.

use serde::{Deserialize, Serialize};

use super::generation::FinishReason;

/// A delta emitted during streaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStreamDelta {
    /// The incremental text chunk.
    pub text: String,
    /// Event type.
    pub event_type: StreamEventType,
    /// Finish reason (only on the final delta).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

impl TextStreamDelta {
    /// Create an incremental text delta.
    pub fn text_delta(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            event_type: StreamEventType::TextDelta,
            finish_reason: None,
        }
    }

    /// Create the terminal delta for a stream.
    pub fn done(finish_reason: Option<FinishReason>) -> Self {
        Self {
            text: String::new(),
            event_type: StreamEventType::Done,
            finish_reason,
        }
    }
}

/// Type of stream event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreamEventType {
    /// Incremental text content.
    TextDelta,
    /// Stream started.
    Start,
    /// Stream finished.
    Done,
    /// Error during stream.
    Error,
}

/// Final result after consuming a text stream.
#[derive(Debug, Clone)]
pub struct StreamTextResult {
    /// Full accumulated text.
    pub text: String,
    /// Finish reason.
    pub finish_reason: Option<FinishReason>,
}
