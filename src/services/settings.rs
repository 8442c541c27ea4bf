use std::env::VarError;

use bon::Builder;

use crate::models::error::ChatError;
use crate::models::types::{ApiKey, ApiVersion, DeploymentName};

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_DEPLOYMENT_NAME: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "AZURE_OPENAI_TIMEOUT_SECS";

const ALL_KEYS: [&str; 5] = [ENV_ENDPOINT, ENV_API_KEY, ENV_DEPLOYMENT_NAME, ENV_API_VERSION, ENV_TIMEOUT_SECS];

pub const DEFAULT_AGENT_NAME: &str = "SK-Assistant";
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant.";

/// Connection settings for one [`crate::services::chatbot::ConversationalClient`].
///
/// Immutable once built. Construction accepts empty values; [`ClientConfig::validate`]
/// rejects them before any request leaves the process.
#[derive(Debug, Clone, Builder)]
pub struct ClientConfig {
    #[builder(into)]
    pub endpoint: String,
    #[builder(into)]
    pub api_key: ApiKey,
    #[builder(into)]
    pub deployment_name: DeploymentName,
    #[builder(into, default)]
    pub api_version: ApiVersion,
    #[builder(into, default = DEFAULT_AGENT_NAME.to_string())]
    pub agent_name: String,
    #[builder(into, default = DEFAULT_INSTRUCTIONS.to_string())]
    pub instructions: String,
    /// Deadline for a single request; `None` waits as long as the HTTP stack does.
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Reads the process environment once. Call after `.env` has been loaded.
    pub fn from_env() -> Result<Self, ChatError> {
        for key in ALL_KEYS {
            env_value(key, std::env::var(key))?;
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an explicit key lookup.
    ///
    /// Missing required keys become empty strings and are reported by `validate`.
    /// Empty optional keys fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout_secs = match optional(ENV_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ChatError::configuration(format!(
                        "{ENV_TIMEOUT_SECS}={raw:?} must be at least 1 second"
                    )));
                }
                Ok(secs) => Some(secs),
                Err(e) => {
                    return Err(ChatError::configuration(format!(
                        "{ENV_TIMEOUT_SECS}={raw:?} is not a number of seconds: {e}"
                    )));
                }
            },
            None => None,
        };

        Ok(Self::builder()
            .endpoint(lookup(ENV_ENDPOINT).unwrap_or_default())
            .api_key(lookup(ENV_API_KEY).unwrap_or_default())
            .deployment_name(lookup(ENV_DEPLOYMENT_NAME).unwrap_or_default())
            .maybe_api_version(optional(ENV_API_VERSION))
            .maybe_request_timeout_secs(request_timeout_secs)
            .build())
    }

    /// Ensures endpoint, credential and deployment are present.
    pub fn validate(&self) -> Result<(), ChatError> {
        let mut missing = Vec::new();
        if self.endpoint.trim().is_empty() {
            missing.push(ENV_ENDPOINT);
        }
        if self.api_key.is_blank() {
            missing.push(ENV_API_KEY);
        }
        if self.deployment_name.is_blank() {
            missing.push(ENV_DEPLOYMENT_NAME);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ChatError::configuration(format!(
                "required setting(s) missing or empty: {}",
                missing.join(", ")
            )))
        }
    }
}

/// An unset variable is `None`; a value that is not UTF-8 is a configuration error
/// naming the key rather than being read as missing.
fn env_value(key: &str, value: Result<String, VarError>) -> Result<Option<String>, ChatError> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ChatError::configuration(format!(
            "{key} is not valid UTF-8: {raw:?}"
        ))),
    }
}
