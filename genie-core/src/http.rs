//! Shared HTTP client utilities
//!
//! This module provides a shared, lazily-initialized HTTP client for all API
//! calls. Using a single client allows connection pooling across concurrent
//! requests and avoids resource duplication.

use reqwest::Client;
use std::sync::OnceLock;

/// Global HTTP client for Groq API calls
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client.
///
/// No overall request timeout is set: an in-flight completion call runs
/// until the server responds or the connection fails.
pub fn get_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent("chatgenie/0.1")
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}
