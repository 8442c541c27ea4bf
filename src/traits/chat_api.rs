use async_trait::async_trait;

use crate::models::error::ChatError;
use crate::models::types::{ChatMessage, ReplyEnvelope};

/// Transport binding to a remote chat-completion service.
///
/// This trait allows consumers to abstract over different backend implementations
/// (e.g., the real HTTP client, mocks for testing).
///
/// Implementations must be thread-safe (`Send + Sync`). A call performs exactly one
/// round trip; retries are never attempted here.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Sends the full message history and returns the service's reply envelope.
    async fn complete(&self, history: &[ChatMessage]) -> Result<ReplyEnvelope, ChatError>;
}
