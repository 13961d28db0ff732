//! Agent definitions and per-session conversation state.

pub mod agent;
pub mod conversation;
pub mod session;

pub use agent::Agent;
pub use conversation::Conversation;
pub use session::{ChatSession, SessionManager};
