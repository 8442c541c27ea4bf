pub mod models;
pub mod services;
pub mod traits;

use tracing::info;

use crate::models::error::ChatError;
use crate::services::chatbot::ConversationalClient;
use crate::services::settings::ClientConfig;

/// The one prompt the binary sends.
pub const PROMPT: &str = "Write a haiku about Semantic Kernel.";

/// Structured logging to stderr (default to info if RUST_LOG not set), so stdout
/// carries only the reply.
pub fn init_logging() {
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_spec))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// High-level entrypoint: init logging, read config from the environment, ask once.
pub async fn run() -> Result<String, ChatError> {
    init_logging();
    let cfg = ClientConfig::from_env()?;
    run_with_config(cfg).await
}

/// Builds the client from `cfg` and returns its reply to [`PROMPT`].
pub async fn run_with_config(cfg: ClientConfig) -> Result<String, ChatError> {
    info!(endpoint = %cfg.endpoint, deployment = %cfg.deployment_name, api_version = %cfg.api_version, "starting");
    let chatbot = ConversationalClient::new(cfg)?;
    chatbot.respond(PROMPT).await
}
