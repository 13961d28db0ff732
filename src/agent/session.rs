//! Chat session state and the session registry.

use std::collections::HashMap;

use uuid::Uuid;

use super::conversation::Conversation;

/// One chat session: an id plus its conversation history.
///
/// Sessions are owned mutably by whatever is handling the current turn,
/// so per-session serialization comes from ownership rather than locking.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    conversation: Conversation,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Create a session with a fresh random id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation: Conversation::new(),
        }
    }

    /// Create a session with a caller-supplied id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            conversation: Conversation::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }
}

/// Manages multiple named chat sessions.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, ChatSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a session by ID.
    pub fn get_or_create(&mut self, session_id: &str) -> &mut ChatSession {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| ChatSession::with_id(session_id))
    }

    /// Get an existing session.
    pub fn get(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.get(session_id)
    }

    /// Remove a session, ending its lifecycle.
    pub fn remove(&mut self, session_id: &str) -> Option<ChatSession> {
        self.sessions.remove(session_id)
    }

    /// List session IDs.
    pub fn session_ids(&self) -> Vec<&str> {
        self.sessions.keys().map(|k| k.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_is_idempotent() {
        let mut mgr = SessionManager::new();
        mgr.get_or_create("s1").conversation_mut().add_user_message("hi");
        assert_eq!(mgr.get_or_create("s1").conversation().len(), 1);
        assert_eq!(mgr.session_ids().len(), 1);
    }

    #[test]
    fn remove_ends_the_session() {
        let mut mgr = SessionManager::new();
        mgr.get_or_create("s1");
        assert!(mgr.remove("s1").is_some());
        assert!(mgr.get("s1").is_none());
    }
}
