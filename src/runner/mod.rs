//! Turn orchestration: the tool-call / hand-off loop.
//!
//! A turn submits the active agent's instructions plus the accumulated
//! history to the provider and interprets the response as one of: a final
//! answer, a request to call a declared tool, or a request to hand off to
//! a declared sub-agent. Tool results are fed back as synthetic tool turns
//! and the loop continues until a final answer or the iteration bound.
//!
//! Fail-closed policy: a tool name the active agent never declared, a
//! hand-off to an agent already visited this turn, and a hand-off beyond
//! the hop bound are all rejected with an error tool result the model can
//! see, never silently honored.

use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::error::CiceroneError;
use crate::provider::{ChatRequest, ModelProvider, ToolDefinition};
use crate::types::*;

/// Maximum provider round trips per turn.
pub const MAX_TOOL_ITERATIONS: usize = 10;

/// Maximum distinct agents a single turn may pass through.
pub const MAX_HANDOFF_HOPS: usize = 5;

const HANDOFF_PREFIX: &str = "transfer_to_";

/// Result of one orchestrated turn.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The final assistant text for this turn.
    pub final_output: String,
    /// Name of the agent that produced the final answer.
    pub last_agent: String,
}

/// Name of the synthetic tool that hands a turn off to `agent_name`.
pub fn handoff_tool_name(agent_name: &str) -> String {
    let slug: String = agent_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{HANDOFF_PREFIX}{slug}")
}

/// Orchestrates turns against one provider.
pub struct Runner<'p> {
    provider: &'p dyn ModelProvider,
    settings: GenerationSettings,
}

impl<'p> Runner<'p> {
    pub fn new(provider: &'p dyn ModelProvider) -> Self {
        Self {
            provider,
            settings: GenerationSettings::default(),
        }
    }

    /// Set generation settings for subsequent runs.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Run a turn to completion and return the final text.
    pub async fn run(
        &self,
        agent: Arc<Agent>,
        history: Vec<ChatMessage>,
    ) -> Result<RunResult, CiceroneError> {
        let mut current = agent;
        let mut visited = vec![current.name().to_string()];
        let mut history = history;
        let mut last_text = String::new();

        for iteration in 0..MAX_TOOL_ITERATIONS {
            let request = self.build_request(&current, &history);

            debug!(iteration, agent = current.name(), "runner: calling provider");
            let response = self.provider.generate(&request).await?;
            last_text = response.text.clone();

            if response.tool_calls.is_empty() {
                return Ok(RunResult {
                    final_output: response.text,
                    last_agent: current.name().to_string(),
                });
            }

            if let Some(next) =
                self.process_tool_calls(&current, &mut visited, &response, &mut history).await
            {
                current = next;
            }
        }

        // Iteration bound hit: surface whatever the model last said.
        warn!(agent = current.name(), "runner: hit iteration bound");
        Ok(RunResult {
            final_output: last_text,
            last_agent: current.name().to_string(),
        })
    }

    /// Run a turn, streaming the final answer as text deltas.
    ///
    /// Tool calls and hand-offs are resolved with non-streaming calls.
    /// Once resolution lands on an agent with an empty capability set its
    /// reply is streamed straight from the provider; a final answer from a
    /// capable agent is emitted as a single delta followed by Done. Either
    /// way the stream is finite, single-pass, and concatenates to the
    /// aggregated final text.
    pub async fn run_streamed(
        &self,
        agent: Arc<Agent>,
        history: Vec<ChatMessage>,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, CiceroneError>>, CiceroneError> {
        let mut current = agent;
        let mut visited = vec![current.name().to_string()];
        let mut history = history;
        let mut last_text = String::new();

        for iteration in 0..MAX_TOOL_ITERATIONS {
            let request = self.build_request(&current, &history);

            if !current.has_capabilities() {
                debug!(iteration, agent = current.name(), "runner: streaming reply");
                return self.provider.stream(&request).await;
            }

            debug!(iteration, agent = current.name(), "runner: calling provider");
            let response = self.provider.generate(&request).await?;
            last_text = response.text.clone();

            if response.tool_calls.is_empty() {
                return Ok(single_delta_stream(response.text, response.finish_reason));
            }

            if let Some(next) =
                self.process_tool_calls(&current, &mut visited, &response, &mut history).await
            {
                current = next;
            }
        }

        warn!(agent = current.name(), "runner: hit iteration bound");
        Ok(single_delta_stream(last_text, Some(FinishReason::Length)))
    }

    fn build_request(&self, agent: &Agent, history: &[ChatMessage]) -> ChatRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(agent.instructions()));
        messages.extend_from_slice(history);

        ChatRequest {
            messages,
            settings: self.settings.clone(),
            tools: tool_definitions(agent),
        }
    }

    /// Execute the tool calls of one response, appending the assistant
    /// message and each tool result to the history. Returns the hand-off
    /// target when one was accepted.
    async fn process_tool_calls(
        &self,
        current: &Arc<Agent>,
        visited: &mut Vec<String>,
        response: &crate::provider::ChatResponse,
        history: &mut Vec<ChatMessage>,
    ) -> Option<Arc<Agent>> {
        let mut assistant_content: Vec<ContentPart> = Vec::new();
        if !response.text.is_empty() {
            assistant_content.push(ContentPart::Text {
                text: response.text.clone(),
            });
        }
        for tc in &response.tool_calls {
            assistant_content.push(ContentPart::ToolCall(tc.clone()));
        }
        history.push(ChatMessage {
            role: Role::Assistant,
            content: assistant_content,
            timestamp: Some(chrono::Utc::now()),
        });

        let mut next_agent: Option<Arc<Agent>> = None;

        for tc in &response.tool_calls {
            let (result, is_error) = if tc.name.starts_with(HANDOFF_PREFIX) {
                match self.resolve_handoff(current, visited, &tc.name, next_agent.is_some()) {
                    Ok(target) => {
                        let name = target.name().to_string();
                        next_agent = Some(target);
                        (
                            serde_json::json!({ "assistant": name }),
                            false,
                        )
                    }
                    Err(e) => {
                        warn!(tool = %tc.name, error = %e, "hand-off rejected");
                        (serde_json::json!({ "error": e.to_string() }), true)
                    }
                }
            } else {
                match current.find_tool(&tc.name) {
                    Some(tool) => {
                        let args = crate::tools::ToolArguments::new(tc.arguments.clone());
                        match tool.execute(&args).await {
                            Ok(val) => (val, false),
                            Err(e) => {
                                warn!(tool = %tc.name, error = %e, "tool execution failed");
                                (serde_json::json!({ "error": e.to_string() }), true)
                            }
                        }
                    }
                    None => {
                        warn!(tool = %tc.name, agent = current.name(), "tool not declared");
                        (
                            serde_json::json!({
                                "error": format!("Tool '{}' is not available to this agent", tc.name)
                            }),
                            true,
                        )
                    }
                }
            };

            history.push(ChatMessage::tool_result(tc.id.clone(), result, is_error));
        }

        next_agent
    }

    /// Validate a hand-off request against the declared targets, the
    /// visited set, and the hop bound.
    fn resolve_handoff(
        &self,
        current: &Arc<Agent>,
        visited: &mut Vec<String>,
        tool_name: &str,
        already_switching: bool,
    ) -> Result<Arc<Agent>, CiceroneError> {
        let target = current
            .handoffs()
            .iter()
            .find(|a| handoff_tool_name(a.name()) == tool_name)
            .ok_or_else(|| {
                CiceroneError::HandoffRejected(format!(
                    "'{tool_name}' is not a declared hand-off target"
                ))
            })?;

        if already_switching {
            return Err(CiceroneError::HandoffRejected(
                "a hand-off was already accepted this round".into(),
            ));
        }
        if visited.iter().any(|v| v == target.name()) {
            return Err(CiceroneError::HandoffRejected(format!(
                "'{}' was already active in this turn",
                target.name()
            )));
        }
        if visited.len() >= MAX_HANDOFF_HOPS {
            return Err(CiceroneError::HandoffRejected(format!(
                "hand-off hop bound ({MAX_HANDOFF_HOPS}) reached"
            )));
        }

        visited.push(target.name().to_string());
        Ok(Arc::clone(target))
    }
}

/// Declared tools plus a synthetic `transfer_to_*` tool per hand-off target.
fn tool_definitions(agent: &Agent) -> Option<Vec<ToolDefinition>> {
    let mut defs: Vec<ToolDefinition> = agent
        .tools()
        .iter()
        .map(|t| ToolDefinition {
            name: t.name().to_string(),
            description: t.description().to_string(),
            parameters: t.parameters().schema.clone(),
        })
        .collect();

    for target in agent.handoffs() {
        defs.push(ToolDefinition {
            name: handoff_tool_name(target.name()),
            description: format!(
                "Hand the conversation off to the {} agent",
                target.name()
            ),
            parameters: crate::tools::ToolParameters::empty().schema,
        });
    }

    if defs.is_empty() {
        None
    } else {
        Some(defs)
    }
}

fn single_delta_stream(
    text: String,
    finish_reason: Option<FinishReason>,
) -> BoxStream<'static, Result<TextStreamDelta, CiceroneError>> {
    futures::stream::iter(vec![
        Ok(TextStreamDelta::text_delta(text)),
        Ok(TextStreamDelta::done(finish_reason.or(Some(FinishReason::Stop)))),
    ])
    .boxed()
}

/// Drain a delta stream into its aggregated final result.
pub async fn collect_stream(
    mut stream: BoxStream<'static, Result<TextStreamDelta, CiceroneError>>,
) -> Result<StreamTextResult, CiceroneError> {
    let mut text = String::new();
    let mut finish_reason = None;

    while let Some(delta) = stream.next().await {
        let delta = delta?;
        text.push_str(&delta.text);
        if let Some(fr) = delta.finish_reason {
            finish_reason = Some(fr);
        }
    }

    Ok(StreamTextResult {
        text,
        finish_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handoff_tool_names_are_slugged() {
        assert_eq!(handoff_tool_name("Mood Helper"), "transfer_to_mood_helper");
        assert_eq!(handoff_tool_name("store-agent"), "transfer_to_store_agent");
    }
}
