mod pages;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use genie_core::{ChatClient, Config, Genie};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared handler state: the completion client behind its trait, injected
/// so tests can substitute a scripted implementation.
#[derive(Clone)]
pub struct AppState {
    pub genie: Arc<dyn ChatClient>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Starting ChatGenie v{}", VERSION);

    // Loads .env and validates required variables; a missing GROQ_API_KEY
    // aborts startup here, before the listener binds.
    let config = Config::from_env()?;

    let state = AppState {
        genie: Arc::new(Genie::new(config.groq_api_key)),
    };

    let app = Router::new()
        .route("/", get(pages::index).post(pages::ask))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
