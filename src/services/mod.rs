pub mod agent;
pub mod azure_chat;
pub mod chatbot;
pub mod settings;
pub mod utils;
