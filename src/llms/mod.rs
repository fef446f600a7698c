//! LLM provider integration.

pub mod providers;
pub mod streaming;

pub use providers::groq::GroqCompletion;
pub use streaming::{GenerationOutcome, StreamChunk, StreamReceiver, StreamingLLM};
