use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

/// API version used when `AZURE_OPENAI_API_VERSION` is not set.
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Секретный ключ API. Никогда не печатается целиком.
#[derive(Clone, PartialEq, Eq, From, Into, AsRef, FromStr)]
#[from(String, &str)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(***)")
        }
    }
}

/// Имя развёртывания модели
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into, Display, AsRef, FromStr)]
#[from(String, &str)]
pub struct DeploymentName(String);

impl DeploymentName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Версия протокола (`api-version`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, From, Into, Display, AsRef, FromStr)]
#[from(String, &str)]
pub struct ApiVersion(String);

impl ApiVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self(DEFAULT_API_VERSION.to_string())
    }
}

/// Роль автора сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the history sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into(), name: None }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), name: None }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Transport-neutral view of a completion reply. Only `content` is consumed by
/// [`crate::services::chatbot::ConversationalClient::respond`].
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ReplyEnvelope {
    #[builder(into)]
    pub id: Option<String>,
    #[builder(into)]
    pub model: Option<String>,
    #[builder(default = Role::Assistant)]
    pub role: Role,
    #[builder(into)]
    pub content: Option<String>,
    #[builder(into)]
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

impl ReplyEnvelope {
    /// Plain assistant reply carrying only text.
    pub fn text(content: impl Into<String>) -> Self {
        Self::builder()
            .content(content)
            .finish_reason("stop")
            .build()
    }
}

/// Reply as returned by the agent: text plus the agent name stamped as author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    pub name: String,
    pub content: String,
}
