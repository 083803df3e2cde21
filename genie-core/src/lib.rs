pub mod chat;
pub mod config;
pub mod groq;
pub mod http;

// Re-export commonly used types
pub use chat::{ChatClient, ChatError, Genie};
pub use config::Config;
