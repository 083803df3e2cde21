//! The single page: a query form plus the latest reply.
//!
//! Both verbs render the same template. Failures from the completion call
//! stay on the page as text with a fixed prefix; the HTTP status is 200
//! either way.

use crate::AppState;
use askama::Template;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Local;
use serde::Deserialize;
use std::time::Instant;
use tracing::{error, info};

/// Fixed prefix shown before a failure description
const BOT_ERROR_PREFIX: &str = "❌ Oops, something went wrong: ";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    user_msg: String,
    bot_response: String,
    now: String,
}

/// Form body for `POST /`; a missing `query` field reads as empty
#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub query: String,
}

/// `GET /`: the empty form, no completion call
pub async fn index() -> Response {
    render_page(String::new(), String::new())
}

/// `POST /`: forward the query to the completion client and render the
/// reply into the same page.
///
/// A missing, empty, or whitespace-only query skips the completion call
/// and behaves exactly like `GET /`.
pub async fn ask(State(state): State<AppState>, Form(form): Form<AskForm>) -> Response {
    let user_msg = form.query.trim().to_string();

    if user_msg.is_empty() {
        return render_page(user_msg, String::new());
    }

    let start = Instant::now();
    let bot_response = match state.genie.reply(&user_msg).await {
        Ok(reply) => {
            info!(
                query = %user_msg,
                duration_ms = %start.elapsed().as_millis(),
                "Query answered"
            );
            reply
        }
        Err(e) => {
            error!(
                query = %user_msg,
                error = %e,
                duration_ms = %start.elapsed().as_millis(),
                "Query failed"
            );
            format!("{BOT_ERROR_PREFIX}{e}")
        }
    };

    render_page(user_msg, bot_response)
}

fn render_page(user_msg: String, bot_response: String) -> Response {
    let template = IndexTemplate {
        user_msg,
        bot_response,
        now: Local::now().format("%Y-%m-%d %H:%M").to_string(),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}
