use thiserror::Error;

/// Failure modes of a single chat round trip.
///
/// Nothing in the crate recovers from these: every variant travels unchanged up to
/// the entry point, which prints it and exits with a non-zero status.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A required setting is missing or malformed, or the service says the
    /// endpoint/deployment does not exist.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The remote service rejected the credential.
    #[error("authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Connection failure, timeout or a dropped response. Not retried.
    #[error("network error: {0}")]
    TransientNetwork(String),

    /// The service answered with a logical failure (quota, content filter, 5xx)
    /// or with a reply that could not be understood.
    #[error("upstream error (HTTP {status}{}): {message}", code_suffix(.code))]
    Upstream {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(", {c}")).unwrap_or_default()
}

impl ChatError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::TransientNetwork(msg.into())
    }

    pub fn upstream(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    pub fn is_transient_network(&self) -> bool {
        matches!(self, Self::TransientNetwork(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
