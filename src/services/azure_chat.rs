use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use url::Url;

use crate::models::error::ChatError;
use crate::models::types::{ApiKey, ApiVersion, ChatMessage, DeploymentName, ReplyEnvelope, Role, Usage};
use crate::services::settings::ClientConfig;
use crate::services::utils::{preview, LOG_PREVIEW_CHARS};
use crate::traits::chat_api::ChatApi;

const API_KEY_HEADER: &str = "api-key";
const CONTENT_FILTER: &str = "content_filter";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    id: Option<String>,
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    role: Option<Role>,
    content: Option<String>,
}

impl CompletionResponse {
    fn into_envelope(self, status: StatusCode) -> Result<ReplyEnvelope, ChatError> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            ChatError::upstream(status.as_u16(), None, "reply contained no choices")
        })?;
        let (role, content) = match choice.message {
            Some(m) => (m.role.unwrap_or(Role::Assistant), m.content),
            None => (Role::Assistant, None),
        };
        // A filtered reply may still carry a truncated text; never hand that out.
        if choice.finish_reason.as_deref() == Some(CONTENT_FILTER) {
            return Err(ChatError::upstream(
                status.as_u16(),
                Some(CONTENT_FILTER.to_string()),
                "reply was withheld or cut short by the content filter",
            ));
        }
        Ok(ReplyEnvelope::builder()
            .maybe_id(self.id)
            .maybe_model(self.model)
            .role(role)
            .maybe_content(content)
            .maybe_finish_reason(choice.finish_reason)
            .maybe_usage(self.usage)
            .build())
    }
}

/// `ChatApi` over the Azure OpenAI chat-completions REST endpoint.
///
/// One instance is bound to a single deployment. Building it performs no I/O;
/// the endpoint URL is only checked when a request is made.
#[derive(Builder)]
pub struct AzureChatCompletion {
    client: Client,
    #[builder(into)]
    endpoint: String,
    api_key: ApiKey,
    deployment_name: DeploymentName,
    api_version: ApiVersion,
}

impl AzureChatCompletion {
    pub fn from_config(cfg: &ClientConfig) -> Result<Self, ChatError> {
        let mut http = Client::builder();
        if let Some(secs) = cfg.request_timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }
        let client = http
            .build()
            .map_err(|e| ChatError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::builder()
            .client(client)
            .endpoint(cfg.endpoint.clone())
            .api_key(cfg.api_key.clone())
            .deployment_name(cfg.deployment_name.clone())
            .api_version(cfg.api_version.clone())
            .build())
    }

    /// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}`
    pub fn completions_url(&self) -> Result<Url, ChatError> {
        let raw = self.endpoint.trim();
        let mut url = Url::parse(raw)
            .map_err(|e| ChatError::configuration(format!("endpoint {raw:?} is not a valid URL: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChatError::configuration(format!(
                "endpoint {raw:?} must use http or https"
            )));
        }
        url.path_segments_mut()
            .map_err(|_| ChatError::configuration(format!("endpoint {raw:?} cannot be used as a base URL")))?
            .pop_if_empty()
            .extend(["openai", "deployments", self.deployment_name.as_str(), "chat", "completions"]);
        url.query_pairs_mut()
            .append_pair("api-version", self.api_version.as_str());
        Ok(url)
    }
}

fn map_transport_error(e: reqwest::Error) -> ChatError {
    if e.is_builder() {
        ChatError::configuration(format!("invalid request: {e}"))
    } else if e.is_timeout() {
        ChatError::network(format!("request timed out: {e}"))
    } else if e.is_connect() {
        ChatError::network(format!("could not connect: {e}"))
    } else {
        ChatError::network(format!("request failed: {e}"))
    }
}

/// Pulls `(code, message)` out of the service's error body.
///
/// Handles both `{"error":{"code":..,"message":..}}` and the gateway form
/// `{"statusCode":..,"message":..}`; anything else yields the raw body.
fn parse_error_body(body: &str) -> (Option<String>, String) {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return (None, body.trim().to_string());
    };
    let detail = json.get("error").unwrap_or(&json);
    let code = detail.get("code").and_then(|c| match c {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    });
    let message = detail
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());
    (code, message)
}

/// Maps a non-success HTTP status to the error taxonomy.
pub fn classify_status(status: StatusCode, body: &str) -> ChatError {
    let (code, message) = parse_error_body(body);
    let code_num = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ChatError::Authentication {
            status: code_num,
            message,
        },
        StatusCode::NOT_FOUND => ChatError::configuration(format!(
            "endpoint or deployment not found (HTTP 404): {message}"
        )),
        StatusCode::REQUEST_TIMEOUT => {
            ChatError::network(format!("service reported a request timeout: {message}"))
        }
        _ => ChatError::upstream(code_num, code, message),
    }
}

#[async_trait]
impl ChatApi for AzureChatCompletion {
    async fn complete(&self, history: &[ChatMessage]) -> Result<ReplyEnvelope, ChatError> {
        let url = self.completions_url()?;
        let last = history.last().map(|m| m.content.as_str()).unwrap_or_default();
        info!(
            deployment = %self.deployment_name,
            api_version = %self.api_version,
            messages = history.len(),
            prompt_preview = %preview(last, LOG_PREVIEW_CHARS),
            "azure: chat request"
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&CompletionRequest { messages: history })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_status(status, &body);
            error!(status = %status, error = %err, "azure: chat request failed");
            return Err(err);
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(body_len = body.len(), "azure: reply received");
        let parsed: CompletionResponse = serde_json::from_slice(&body).map_err(|e| {
            ChatError::upstream(
                status.as_u16(),
                Some("invalid_response".to_string()),
                format!("could not decode reply: {e}"),
            )
        })?;
        let envelope = parsed.into_envelope(status)?;

        info!(
            finish_reason = ?envelope.finish_reason,
            total_tokens = envelope.usage.map(|u| u.total_tokens),
            response_preview = %preview(envelope.content.as_deref().unwrap_or_default(), LOG_PREVIEW_CHARS),
            "azure: chat response"
        );
        Ok(envelope)
    }
}
