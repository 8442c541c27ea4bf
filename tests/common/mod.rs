#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chatbot_agent::models::error::ChatError;
use chatbot_agent::models::types::{ChatMessage, ReplyEnvelope};
use chatbot_agent::services::settings::ClientConfig;
use chatbot_agent::traits::chat_api::ChatApi;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DEPLOYMENT: &str = "gpt-x";
pub const API_VERSION: &str = "2024-02-15-preview";
pub const API_KEY: &str = "k";
pub const HAIKU: &str = "Kernel hums below / Plugins weave through logic's thread / Answers bloom in light.";

/// What the mocked transport does on every call.
#[derive(Clone)]
pub enum Behavior {
    Reply(String),
    RejectCredential,
    TimeOut,
}

/// In-process `ChatApi` that counts its invocations.
pub struct MockChatApi {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockChatApi {
    pub fn new(behavior: Behavior) -> Self {
        Self { behavior, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn complete(&self, _history: &[ChatMessage]) -> Result<ReplyEnvelope, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Reply(text) => Ok(ReplyEnvelope::text(text.clone())),
            Behavior::RejectCredential => Err(ChatError::Authentication {
                status: 401,
                message: "Access denied due to invalid subscription key.".to_string(),
            }),
            Behavior::TimeOut => Err(ChatError::network("request timed out")),
        }
    }
}

pub fn config(endpoint: &str) -> ClientConfig {
    ClientConfig::builder()
        .endpoint(endpoint)
        .api_key(API_KEY)
        .deployment_name(DEPLOYMENT)
        .api_version(API_VERSION)
        .build()
}

pub fn completions_path() -> String {
    format!("/openai/deployments/{DEPLOYMENT}/chat/completions")
}

/// Reply body shaped like the Azure OpenAI chat-completions response.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 24, "completion_tokens": 19, "total_tokens": 43 }
    })
}

pub async fn mount_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path(completions_path()))
        .and(query_param("api-version", API_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_error(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(completions_path()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}
