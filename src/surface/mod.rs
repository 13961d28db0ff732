//! Session surface: relays user turns between a chat UI and the runner.

pub mod classify;

pub use classify::{classify, Intercept};

use std::sync::Arc;

use tracing::debug;

use crate::agent::{Agent, ChatSession};
use crate::error::CiceroneError;
use crate::provider::ModelProvider;
use crate::runner::Runner;
use crate::types::GenerationSettings;

/// Binds an agent, a provider, and one session's history into a pair of
/// UI-facing handlers: `on_chat_start` and `on_message`.
///
/// The surface owns the session, so one inbound message is processed at a
/// time and history mutation stays inside the handler for that turn.
pub struct ChatSurface<'p> {
    agent: Arc<Agent>,
    provider: &'p dyn ModelProvider,
    settings: GenerationSettings,
    session: ChatSession,
    greeting: String,
    classifier_enabled: bool,
    input_template: Option<String>,
    reply_prefix: Option<String>,
}

impl<'p> ChatSurface<'p> {
    pub fn new(agent: Arc<Agent>, provider: &'p dyn ModelProvider) -> Self {
        Self {
            agent,
            provider,
            settings: GenerationSettings::default(),
            session: ChatSession::new(),
            greeting: "Hello, How can I help you today?".to_string(),
            classifier_enabled: false,
            input_template: None,
            reply_prefix: None,
        }
    }

    /// Set the greeting emitted on session start.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Enable the pre-agent short-circuit classifier.
    pub fn with_classifier(mut self) -> Self {
        self.classifier_enabled = true;
        self
    }

    /// Wrap pass-through input in a template (`{input}` placeholder).
    pub fn with_input_template(mut self, template: impl Into<String>) -> Self {
        self.input_template = Some(template.into());
        self
    }

    /// Prefix non-streamed replies with a fixed marker.
    pub fn with_reply_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reply_prefix = Some(prefix.into());
        self
    }

    /// Set generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Use an existing session instead of a fresh one.
    pub fn with_session(mut self, session: ChatSession) -> Self {
        self.session = session;
        self
    }

    /// The session backing this surface.
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    /// Session start: emit the greeting. History is untouched.
    pub fn on_chat_start(&self) -> &str {
        &self.greeting
    }

    /// Handle one user message and return the complete reply.
    pub async fn on_message(&mut self, text: &str) -> Result<String, CiceroneError> {
        if let Some(intercept) = self.intercept(text) {
            return Ok(intercept.reply().to_string());
        }

        let input = self.apply_template(text);
        self.session.conversation_mut().add_user_message(&input);

        let runner = Runner::new(self.provider).with_settings(self.settings.clone());
        let result = runner
            .run(
                Arc::clone(&self.agent),
                self.session.conversation().messages().to_vec(),
            )
            .await?;

        let reply = match &self.reply_prefix {
            Some(prefix) => format!("{prefix}{}", result.final_output),
            None => result.final_output.clone(),
        };
        self.session.conversation_mut().add_assistant_message(&reply);

        Ok(reply)
    }

    /// Handle one user message, invoking `on_delta` for each streamed text
    /// fragment, and return the aggregated reply.
    pub async fn on_message_streamed(
        &mut self,
        text: &str,
        mut on_delta: impl FnMut(&str),
    ) -> Result<String, CiceroneError> {
        if let Some(intercept) = self.intercept(text) {
            let reply = intercept.reply().to_string();
            on_delta(&reply);
            return Ok(reply);
        }

        let input = self.apply_template(text);
        self.session.conversation_mut().add_user_message(&input);

        let runner = Runner::new(self.provider).with_settings(self.settings.clone());
        let mut stream = runner
            .run_streamed(
                Arc::clone(&self.agent),
                self.session.conversation().messages().to_vec(),
            )
            .await?;

        let mut reply = String::new();
        use futures::StreamExt;
        while let Some(delta) = stream.next().await {
            let delta = delta?;
            if !delta.text.is_empty() {
                on_delta(&delta.text);
                reply.push_str(&delta.text);
            }
        }

        self.session.conversation_mut().add_assistant_message(&reply);

        Ok(reply)
    }

    fn intercept(&self, text: &str) -> Option<Intercept> {
        if !self.classifier_enabled {
            return None;
        }
        let intercept = classify(text);
        if intercept.is_some() {
            debug!(?intercept, "classifier short-circuit");
        }
        intercept
    }

    fn apply_template(&self, text: &str) -> String {
        match &self.input_template {
            Some(template) => template.replace("{input}", text.trim()),
            None => text.to_string(),
        }
    }
}
