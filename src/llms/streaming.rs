//! Streaming LLM response support.
//!
//! Providers yield [`StreamChunk`] values through a pull-based
//! [`StreamReceiver`]: a finite, non-restartable sequence of text fragments
//! in generation order. Concatenating fragments in receipt order
//! reconstructs the full response — no reordering, no deduplication.
//!
//! Failures never unwind through the pipeline: request-setup errors surface
//! as `Result::Err` from [`StreamingLLM::stream`], mid-stream errors arrive
//! as [`StreamChunk::Error`], and [`collect`] folds both shapes into an
//! explicit [`GenerationOutcome`] the caller pattern-matches on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::utilities::errors::GenerationError;

// ---------------------------------------------------------------------------
// StreamChunk
// ---------------------------------------------------------------------------

/// A single chunk from a streaming LLM response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamChunk {
    /// A text delta (partial text content).
    TextDelta {
        /// The text fragment.
        text: String,
    },

    /// The stream finished cleanly. Carries the final assembled text.
    Done {
        /// The complete response text.
        content: String,
    },

    /// The stream failed mid-flight. Any partial text is void.
    Error {
        /// Error detail, for logs only — never shown to the end user.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// StreamingLLM trait
// ---------------------------------------------------------------------------

/// A text-generation backend that streams its response.
#[async_trait]
pub trait StreamingLLM: Send + Sync {
    /// Open a streaming completion request for one (system prompt, user
    /// message) pair.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be set up (transport error, backend
    /// rejection). Errors after the stream is open arrive in-band as
    /// [`StreamChunk::Error`].
    async fn stream(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Box<dyn StreamReceiver>, GenerationError>;
}

/// Receiver for streaming chunks.
///
/// Abstracts over the underlying transport.
#[async_trait]
pub trait StreamReceiver: Send {
    /// Get the next chunk from the stream.
    ///
    /// Returns `None` once the stream is exhausted (after a `Done` or
    /// `Error` chunk).
    async fn next(&mut self) -> Option<StreamChunk>;
}

// ---------------------------------------------------------------------------
// ChannelStreamReceiver — wraps a tokio channel
// ---------------------------------------------------------------------------

/// A `StreamReceiver` backed by a tokio mpsc channel.
///
/// Default implementation for providers that push chunks from a background
/// task reading the wire.
pub struct ChannelStreamReceiver {
    rx: mpsc::Receiver<StreamChunk>,
}

impl ChannelStreamReceiver {
    pub fn new(rx: mpsc::Receiver<StreamChunk>) -> Self {
        Self { rx }
    }

    /// Create a matched pair of sender + receiver.
    pub fn pair(buffer: usize) -> (mpsc::Sender<StreamChunk>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self { rx })
    }
}

#[async_trait]
impl StreamReceiver for ChannelStreamReceiver {
    async fn next(&mut self) -> Option<StreamChunk> {
        self.rx.recv().await
    }
}

// ---------------------------------------------------------------------------
// GenerationOutcome
// ---------------------------------------------------------------------------

/// Explicit result of one generation call.
///
/// Downstream stages (domain guard, memory) pattern-match on this instead
/// of relying on surrounding failure handlers. `Failure` means the whole
/// response is void — no partial text is kept from a failed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The stream completed; carries the full concatenated text.
    Success(String),
    /// Setup or mid-stream failure; carries the reason for the logs.
    Failure(String),
}

/// Drain a stream receiver into a [`GenerationOutcome`].
///
/// Each text fragment is forwarded to `fragments` (if provided) as it
/// arrives, in receipt order, so callers can relay incremental output.
/// A send failure on the fragment channel is ignored — the observer may
/// have gone away, the generation itself is unaffected.
///
/// `Success` always carries the local concatenation of the received
/// fragments, not the provider's `Done` payload, so the text handed
/// downstream is exactly what was relayed.
pub async fn collect(
    mut receiver: Box<dyn StreamReceiver>,
    fragments: Option<&mpsc::Sender<String>>,
) -> GenerationOutcome {
    let mut text = String::new();

    while let Some(chunk) = receiver.next().await {
        match chunk {
            StreamChunk::TextDelta { text: fragment } => {
                text.push_str(&fragment);
                if let Some(tx) = fragments {
                    let _ = tx.send(fragment).await;
                }
            }
            StreamChunk::Done { .. } => return GenerationOutcome::Success(text),
            StreamChunk::Error { message } => return GenerationOutcome::Failure(message),
        }
    }

    // Stream ended without a terminal chunk: the transport dropped the
    // connection. Partial text is discarded.
    GenerationOutcome::Failure("stream closed before completion".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
