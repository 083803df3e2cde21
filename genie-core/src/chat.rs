//! Completion client adapter
//!
//! Wraps the Groq chat completion call behind the [`ChatClient`] trait with
//! a fixed persona and fixed generation parameters. Frontends talk to the
//! model only through this seam, so tests can substitute a scripted client.

use crate::groq::{self, ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

/// Model served by Groq, fixed for every completion
pub const MODEL: &str = "llama-3.3-70b-versatile";

/// Temperature for sampling
pub const TEMPERATURE: f32 = 0.8;

/// Ceiling on response length
pub const MAX_TOKENS: u32 = 512;

/// System prompt defining the assistant persona and tone; prepended to
/// every request and never shown to the end user.
pub const SYSTEM_PROMPT: &str = "You are ChatGenie, a deeply thoughtful and relatable AI assistant. \
    You speak with clarity, creativity, and charm. \
    You don't give generic answers – instead, you break down concepts like a passionate teacher, \
    using analogies, real-life examples, and clear step-by-step reasoning. \
    Avoid being robotic. Make the user feel like they're talking to a knowledgeable friend.";

/// Failure from a completion call.
///
/// One undifferentiated class: callers render the description, they never
/// branch on a cause. No retry, no partial result.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ChatError(String);

impl ChatError {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

/// A client that answers a single question with the model's reply text.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one user question and return the assistant's reply, trimmed
    /// of surrounding whitespace.
    async fn reply(&self, query: &str) -> Result<String, ChatError>;
}

/// Production [`ChatClient`] backed by the Groq API.
///
/// Holds the API credential for the lifetime of the process: constructed
/// once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Genie {
    api_key: String,
}

impl Genie {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

/// Build the fixed request for one user question: the persona system
/// message first, the question as the sole user turn.
fn build_request(query: &str) -> ChatRequest {
    ChatRequest::new(MODEL, query)
        .system(SYSTEM_PROMPT)
        .temperature(TEMPERATURE)
        .max_tokens(MAX_TOKENS)
}

/// Take the first choice's content, trimmed of surrounding whitespace.
fn extract_reply(response: &ChatResponse) -> Result<String, ChatError> {
    let content = response
        .content_or_err()
        .map_err(|e| ChatError::new(format!("{e:#}")))?;
    Ok(content.trim().to_string())
}

#[async_trait]
impl ChatClient for Genie {
    async fn reply(&self, query: &str) -> Result<String, ChatError> {
        let request = build_request(query);
        let start = Instant::now();

        let response = groq::chat_completion(&request, &self.api_key)
            .await
            .map_err(|e| {
                warn!(
                    model = %MODEL,
                    duration_ms = %start.elapsed().as_millis(),
                    error = %e,
                    "Completion call failed"
                );
                ChatError::new(format!("{e:#}"))
            })?;

        let reply = extract_reply(&response)?;

        let total_tokens = response.usage.as_ref().map_or(0, |u| u.total_tokens);
        info!(
            model = %MODEL,
            duration_ms = %start.elapsed().as_millis(),
            total_tokens = %total_tokens,
            "Completion call finished"
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_request_shape() {
        let request = build_request("What is entropy?");

        assert_eq!(request.model, MODEL);
        assert_eq!(request.temperature, Some(TEMPERATURE));
        assert_eq!(request.max_tokens, Some(MAX_TOKENS));
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "What is entropy?");
    }

    #[test]
    fn test_reply_is_trimmed() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  Entropy is a measure of disorder.\n"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();

        let reply = extract_reply(&response).unwrap();
        assert_eq!(reply, "Entropy is a measure of disorder.");
    }

    #[test]
    fn test_empty_choices_become_a_described_failure() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();

        let err = extract_reply(&response).unwrap_err();
        assert!(err.to_string().contains("empty choices"));
    }

    #[test]
    fn test_error_display_is_the_description() {
        let err = ChatError::new("timed out");
        assert_eq!(err.to_string(), "timed out");
    }
}
