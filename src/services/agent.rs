use std::sync::Arc;

use bon::Builder;
use tracing::info;

use crate::models::error::ChatError;
use crate::models::types::{AgentResponse, ChatMessage};
use crate::traits::chat_api::ChatApi;

/// Agent that answers through a [`ChatApi`] under a fixed name and system instructions.
///
/// Holds no history between calls: every `get_response` sends the instructions plus
/// the messages it was given, nothing more.
#[derive(Builder)]
pub struct ChatCompletionAgent {
    service: Arc<dyn ChatApi>,
    #[builder(into)]
    name: String,
    #[builder(into)]
    instructions: String,
}

impl ChatCompletionAgent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    fn history(&self, messages: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut history = Vec::with_capacity(messages.len() + 1);
        if !self.instructions.trim().is_empty() {
            history.push(ChatMessage::system(self.instructions.clone()));
        }
        history.extend_from_slice(messages);
        history
    }

    pub async fn get_response(&self, messages: &[ChatMessage]) -> Result<AgentResponse, ChatError> {
        let history = self.history(messages);
        info!(agent = %self.name, messages = history.len(), "agent: requesting completion");
        let reply = self.service.complete(&history).await?;
        Ok(AgentResponse {
            name: self.name.clone(),
            content: reply.content.unwrap_or_default(),
        })
    }
}
