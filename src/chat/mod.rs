//! Per-session chat pipeline.
//!
//! Each incoming message runs the same sequence:
//!
//! 1. Classify sentiment of the user text.
//! 2. Compose the persona system prompt with the sentiment substituted.
//! 3. Stream the generation, relaying fragments to the caller as they land.
//! 4. Review the finished text with the domain guard, substituting the
//!    canned redirection if it fails.
//! 5. Record the (user, assistant) pair to conversation memory.
//!
//! A generation failure short-circuits after step 3: the caller sees the
//! fixed fallback message, the error detail goes to the logs, and nothing
//! is recorded for the exchange.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::guard;
use crate::llms::streaming::{self, GenerationOutcome, StreamingLLM};
use crate::memory::ConversationMemory;
use crate::persona;
use crate::sentiment::{self, SentimentResult};
use crate::utilities::errors::PersonaError;

/// Apologetic reply shown when generation fails outright.
pub const FALLBACK_MESSAGE: &str = "Something went wrong, please try again";

/// Lifecycle of a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Created,
    Active,
    Ended,
}

/// Everything visible to the caller after one exchange.
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeReply {
    /// Final text: generated, redirected, or the fallback.
    pub text: String,
    /// Sentiment of the user's message.
    pub sentiment: SentimentResult,
    /// True if the domain guard replaced the generated text.
    pub guard_overridden: bool,
    /// True if generation failed and `text` is the fallback message.
    pub generation_failed: bool,
}

/// Session-scoped context carried through the pipeline.
///
/// Owns the conversation memory exclusively; callers serialize access
/// (one outstanding generation per session) by holding the session behind
/// an async mutex.
#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    state: SessionState,
    memory: ConversationMemory,
    started_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create a fresh session with empty memory.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Created,
            memory: ConversationMemory::new(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Read access to the conversation log (inspection and tests only —
    /// the pipeline itself never reads it back).
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Mark the session ended. Memory is discarded with the session value.
    pub fn end(&mut self) {
        self.state = SessionState::Ended;
    }

    /// Run one message through the pipeline.
    ///
    /// Text fragments are forwarded to `fragments` in generation order as
    /// they arrive, letting the caller render incrementally. The final
    /// (guarded) text is only known once the stream completes.
    ///
    /// # Errors
    ///
    /// Only template rendering can error here; generation failures are
    /// folded into the reply per the failure contract.
    pub async fn handle_message(
        &mut self,
        user_text: &str,
        llm: &dyn StreamingLLM,
        fragments: Option<&mpsc::Sender<String>>,
    ) -> Result<ExchangeReply, PersonaError> {
        self.state = SessionState::Active;

        let sentiment = sentiment::analyze(user_text);
        log::debug!(
            "session {}: sentiment {}",
            self.id,
            sentiment.description()
        );

        let system_prompt = persona::compose_system_prompt(&sentiment)?;

        let outcome = match llm.stream(&system_prompt, user_text).await {
            Ok(receiver) => streaming::collect(receiver, fragments).await,
            Err(e) => GenerationOutcome::Failure(e.to_string()),
        };

        match outcome {
            GenerationOutcome::Success(text) => {
                let (final_text, guard_overridden) = guard::enforce(text);
                self.memory.record_user(user_text);
                self.memory.record_assistant(final_text.clone());
                Ok(ExchangeReply {
                    text: final_text,
                    sentiment,
                    guard_overridden,
                    generation_failed: false,
                })
            }
            GenerationOutcome::Failure(reason) => {
                // Detail stays in the logs; the user sees only the fallback.
                log::error!("session {}: generation failed: {reason}", self.id);
                Ok(ExchangeReply {
                    text: FALLBACK_MESSAGE.to_string(),
                    sentiment,
                    guard_overridden: false,
                    generation_failed: true,
                })
            }
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_created_and_empty() {
        let session = ChatSession::new();
        assert_eq!(session.state(), SessionState::Created);
        assert!(session.memory().is_empty());
    }

    #[test]
    fn end_transitions_state() {
        let mut session = ChatSession::new();
        session.end();
        assert_eq!(session.state(), SessionState::Ended);
    }
}
