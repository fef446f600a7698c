//! Axum route handlers for the ashley HTTP server.
//!
//! # Routes
//!
//! - `GET    /health`                 — liveness probe
//! - `GET    /starters`               — canned conversation openers
//! - `POST   /sessions`               — create a chat session
//! - `POST   /sessions/:id/messages`  — run one message through the pipeline
//! - `DELETE /sessions/:id`           — end a session, discarding its memory
//!
//! Sessions live in an in-memory table; each one sits behind its own async
//! mutex so a session processes at most one generation at a time while
//! independent sessions run concurrently with no shared mutable state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::chat::{ChatSession, ExchangeReply};
use crate::config::Settings;
use crate::llms::{GroqCompletion, StreamingLLM};
use crate::persona;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend shared by all sessions.
    pub llm: Arc<dyn StreamingLLM>,
    /// Session table. The outer lock guards the map only; each session has
    /// its own mutex held across the generation await.
    pub sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<ChatSession>>>>>,
}

impl AppState {
    /// Build state with a Groq backend from settings.
    pub fn new(settings: &Settings) -> Self {
        Self::with_llm(Arc::new(GroqCompletion::from_settings(settings)))
    }

    /// Build state around an arbitrary backend (used by tests).
    pub fn with_llm(llm: Arc<dyn StreamingLLM>) -> Self {
        Self {
            llm,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/starters", get(starters_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/:id/messages", post(send_message_handler))
        .route("/sessions/:id", delete(end_session_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Incoming chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    /// The raw user text.
    pub message: String,
}

/// Session metadata returned on creation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "ashley",
    }))
}

/// GET /starters — conversation opener buttons for the chat frontend.
async fn starters_handler() -> impl IntoResponse {
    Json(persona::STARTERS)
}

/// POST /sessions — create a session with empty memory.
async fn create_session_handler(
    State(state): State<AppState>,
) -> Result<Json<SessionCreated>, (StatusCode, Json<Value>)> {
    let session = ChatSession::new();
    let created = SessionCreated {
        session_id: session.id(),
        started_at: session.started_at(),
    };

    let mut sessions = state.sessions.write().map_err(lock_poisoned)?;
    sessions.insert(session.id(), Arc::new(Mutex::new(session)));

    tracing::info!(session_id = %created.session_id, "session created");
    Ok(Json(created))
}

/// POST /sessions/:id/messages — one full pipeline pass.
///
/// Holding the session mutex across the generation await is what enforces
/// "exactly one outstanding generation per session": a second message for
/// the same session queues here until the first completes.
async fn send_message_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<ExchangeReply>, (StatusCode, Json<Value>)> {
    let session = {
        let sessions = state.sessions.read().map_err(lock_poisoned)?;
        sessions.get(&id).cloned()
    };

    let Some(session) = session else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("Unknown session: {id}") })),
        ));
    };

    let mut session = session.lock().await;
    let reply = session
        .handle_message(&request.message, state.llm.as_ref(), None)
        .await
        .map_err(|e| {
            tracing::error!(session_id = %id, "prompt composition failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "prompt composition failed" })),
            )
        })?;

    Ok(Json(reply))
}

/// DELETE /sessions/:id — end the session and drop its memory.
async fn end_session_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let removed = {
        let mut sessions = state.sessions.write().map_err(lock_poisoned)?;
        sessions.remove(&id)
    };

    let Some(session) = removed else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("Unknown session: {id}") })),
        ));
    };

    session.lock().await.end();
    tracing::info!(session_id = %id, "session ended");
    Ok(Json(serde_json::json!({ "status": "ended", "session_id": id })))
}

fn lock_poisoned<T>(_: T) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Session table lock poisoned" })),
    )
}
