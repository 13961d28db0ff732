//! Conversation message history management.

use crate::types::{ChatMessage, Role};

/// Append-only message history for one conversation.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user message.
    pub fn add_user_message(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    /// Add an assistant message.
    pub fn add_assistant_message(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(text));
    }

    /// Add a raw message.
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Get all messages.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Clear all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_alternate_user_then_assistant() {
        let mut conv = Conversation::new();
        for i in 0..3 {
            conv.add_user_message(format!("question {i}"));
            conv.add_assistant_message(format!("answer {i}"));
        }

        assert_eq!(conv.len(), 6);
        for (i, msg) in conv.messages().iter().enumerate() {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(msg.role, expected);
        }
    }

    #[test]
    fn clear_empties_history() {
        let mut conv = Conversation::new();
        conv.add_user_message("hi");
        conv.clear();
        assert!(conv.is_empty());
    }
}
