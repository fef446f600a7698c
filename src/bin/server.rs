//! ashley HTTP server binary.
//!
//! Starts an axum HTTP server exposing the chat session endpoints.
//!
//! # Environment Variables
//!
//! - `GROQ_API_KEY` — Groq API key (required; startup fails without it)
//! - `GROQ_MODEL` — model name (default: "llama3-8b-8192")
//! - `GROQ_BASE_URL` — API base URL (default: Groq's public endpoint)
//! - `MAX_COMPLETION_TOKENS` — output ceiling per generation (default: 500)
//! - `HOST` / `PORT` — listen address (default: 0.0.0.0:8000)
//! - `RUST_LOG` — tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! GROQ_API_KEY=gsk_... cargo run --bin server
//! ```

use anyhow::Context;
use ashley::config::Settings;
use ashley::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ashley=debug".into()),
        )
        .init();

    // Configuration is validated before any session handling exists; a
    // missing API key aborts startup with a descriptive error.
    let settings = Settings::from_env().context("configuration error")?;

    let state = AppState::new(&settings);
    let app = app_router(state);

    let bind_addr = settings.bind_addr();
    tracing::info!("ashley server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health                — liveness probe");
    tracing::info!("  GET    /starters              — conversation openers");
    tracing::info!("  POST   /sessions              — create a chat session");
    tracing::info!("  POST   /sessions/:id/messages — send a message");
    tracing::info!("  DELETE /sessions/:id          — end a session");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    axum::serve(listener, app).await.context("server failed")?;

    Ok(())
}
