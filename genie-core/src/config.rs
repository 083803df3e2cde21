use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Default bind address for the web frontend when GENIE_ADDR is not set
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Application configuration from environment
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from .env file and environment.
    ///
    /// A missing or empty GROQ_API_KEY is an error; callers treat it as
    /// fatal and refuse to start, so credential absence is never a
    /// per-request condition.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Not an error if .env is missing

        // An empty or whitespace-only value reads as absent.
        let groq_api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .context("GROQ_API_KEY not set")?;

        let bind_addr = std::env::var("GENIE_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("Invalid GENIE_ADDR")?;

        Ok(Self {
            groq_api_key,
            bind_addr,
        })
    }
}
