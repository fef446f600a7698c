//! Per-session conversation memory.
//!
//! An ordered, append-only log of (user, assistant) message pairs, created
//! at session start and discarded when the session ends. Turns are never
//! reordered or deleted within a session, and no size bound is enforced —
//! unbounded growth over a long session is a known resource concern.
//!
//! The pipeline only writes here; the composed prompt never reads the log
//! back. A read accessor exists for inspection and tests.

use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation log. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

/// Append-only conversation log scoped to one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn.
    pub fn record_user(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::User,
            text: text.into(),
        });
    }

    /// Append an assistant turn.
    pub fn record_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::Assistant,
            text: text.into(),
        });
    }

    /// All turns in chronological append order.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
