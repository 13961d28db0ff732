//! Shared test support: a scriptable mock provider.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::stream::BoxStream;
use futures::StreamExt;

use cicerone::error::CiceroneError;
use cicerone::provider::{ChatRequest, ChatResponse, ModelProvider};
use cicerone::types::{FinishReason, TextStreamDelta, ToolCall};

/// Mock provider that replays queued responses and records requests.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<VecDeque<ChatResponse>>,
    streams: Mutex<VecDeque<Vec<String>>>,
    requests: Mutex<Vec<ChatRequest>>,
    generate_calls: AtomicUsize,
    stream_calls: AtomicUsize,
    next_call_id: AtomicUsize,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(VecDeque::new()),
            streams: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            generate_calls: AtomicUsize::new(0),
            stream_calls: AtomicUsize::new(0),
            next_call_id: AtomicUsize::new(0),
        }
    }

    /// Queue a final text response.
    pub fn queue_text(&self, text: &str) {
        self.responses.lock().unwrap().push_back(ChatResponse {
            text: text.to_string(),
            tool_calls: Vec::new(),
            finish_reason: Some(FinishReason::Stop),
        });
    }

    /// Queue a response requesting a single tool call.
    pub fn queue_tool_call(&self, name: &str, arguments: serde_json::Value) {
        let id = self.next_call_id.fetch_add(1, Ordering::SeqCst);
        self.responses.lock().unwrap().push_back(ChatResponse {
            text: String::new(),
            tool_calls: vec![ToolCall {
                id: format!("call_{id}"),
                name: name.to_string(),
                arguments,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        });
    }

    /// Queue a delta sequence for the next streaming call.
    pub fn queue_stream(&self, fragments: &[&str]) {
        self.streams
            .lock()
            .unwrap()
            .push_back(fragments.iter().map(|s| s.to_string()).collect());
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn stream_calls(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl ModelProvider for MockProvider {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &ChatRequest) -> Result<ChatResponse, CiceroneError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ChatResponse {
                text: String::new(),
                tool_calls: Vec::new(),
                finish_reason: Some(FinishReason::Stop),
            }))
    }

    async fn stream(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, CiceroneError>>, CiceroneError> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let fragments = self
            .streams
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();

        let mut deltas: Vec<Result<TextStreamDelta, CiceroneError>> = fragments
            .into_iter()
            .map(|f| Ok(TextStreamDelta::text_delta(f)))
            .collect();
        deltas.push(Ok(TextStreamDelta::done(Some(FinishReason::Stop))));

        Ok(futures::stream::iter(deltas).boxed())
    }
}
