//! # ashley
//!
//! A persona-constrained emotional-support chat agent. Each user message
//! runs a sequential policy pipeline: lexicon-based sentiment classification,
//! sentiment-aware persona prompt composition, streamed generation against a
//! hosted model, post-hoc domain validation with redirection, and an
//! append-only conversation memory update.
//!
//! The crate ships a library for embedding the pipeline and a standalone
//! HTTP server binary exposing it per session.

pub mod chat;
pub mod config;
pub mod guard;
pub mod llms;
pub mod memory;
pub mod persona;
pub mod sentiment;
pub mod server;
pub mod utilities;

pub use chat::{ChatSession, ExchangeReply, SessionState, FALLBACK_MESSAGE};
pub use config::Settings;
pub use guard::{Verdict, REDIRECTION_REPLY};
pub use llms::{GenerationOutcome, GroqCompletion, StreamingLLM};
pub use memory::{ConversationMemory, ConversationTurn, Role};
pub use sentiment::{analyze, Mood, SentimentResult};

/// Crate version.
pub const VERSION: &str = "0.3.1";
