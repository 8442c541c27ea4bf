use std::sync::Arc;

use tracing::info;

use crate::models::error::ChatError;
use crate::models::types::ChatMessage;
use crate::services::agent::ChatCompletionAgent;
use crate::services::azure_chat::AzureChatCompletion;
use crate::services::settings::ClientConfig;
use crate::traits::chat_api::ChatApi;

/// Single-turn client: one config, one transport binding, one agent.
///
/// Construction never touches the network. Each [`respond`](Self::respond) call is
/// stateless and issues at most one request.
pub struct ConversationalClient {
    config: ClientConfig,
    agent: ChatCompletionAgent,
}

impl ConversationalClient {
    /// Binds the client to the Azure deployment described by `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ChatError> {
        let service: Arc<dyn ChatApi> = Arc::new(AzureChatCompletion::from_config(&config)?);
        Ok(Self::with_service(config, service))
    }

    /// Uses a caller-supplied transport instead of the HTTP one.
    pub fn with_service(config: ClientConfig, service: Arc<dyn ChatApi>) -> Self {
        let agent = ChatCompletionAgent::builder()
            .service(service)
            .name(config.agent_name.clone())
            .instructions(config.instructions.clone())
            .build();
        Self { config, agent }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn agent(&self) -> &ChatCompletionAgent {
        &self.agent
    }

    /// Sends `message` and returns the text of the reply.
    ///
    /// # Errors
    ///
    /// `Configuration` when endpoint, credential or deployment is empty (checked
    /// before any request), otherwise whatever the transport reports.
    pub async fn respond(&self, message: &str) -> Result<String, ChatError> {
        self.config.validate()?;
        info!(
            agent = %self.agent.name(),
            deployment = %self.config.deployment_name,
            message_len = message.len(),
            "chatbot: respond"
        );
        let response = self.agent.get_response(&[ChatMessage::user(message)]).await?;
        Ok(response.content)
    }
}
