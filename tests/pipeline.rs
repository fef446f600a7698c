//! End-to-end pipeline tests with scripted generation backends.
//!
//! No network: the backends replay fixed chunk sequences through the same
//! receiver type the real provider uses.

use async_trait::async_trait;
use tokio::sync::mpsc;

use ashley::chat::{ChatSession, FALLBACK_MESSAGE};
use ashley::guard::REDIRECTION_REPLY;
use ashley::llms::streaming::{ChannelStreamReceiver, StreamChunk, StreamReceiver, StreamingLLM};
use ashley::memory::Role;
use ashley::utilities::errors::GenerationError;

/// Backend that replays a fixed chunk script.
struct ScriptedLlm {
    chunks: Vec<StreamChunk>,
}

impl ScriptedLlm {
    /// Script a clean stream: the given fragments followed by `Done`.
    fn completing(parts: &[&str]) -> Self {
        let mut chunks: Vec<StreamChunk> = parts
            .iter()
            .map(|part| StreamChunk::TextDelta {
                text: (*part).to_string(),
            })
            .collect();
        chunks.push(StreamChunk::Done {
            content: parts.concat(),
        });
        Self { chunks }
    }

    /// Script a stream that fails after the given fragments.
    fn failing_after(parts: &[&str], reason: &str) -> Self {
        let mut chunks: Vec<StreamChunk> = parts
            .iter()
            .map(|part| StreamChunk::TextDelta {
                text: (*part).to_string(),
            })
            .collect();
        chunks.push(StreamChunk::Error {
            message: reason.to_string(),
        });
        Self { chunks }
    }
}

#[async_trait]
impl StreamingLLM for ScriptedLlm {
    async fn stream(
        &self,
        _system_prompt: &str,
        _user_message: &str,
    ) -> Result<Box<dyn StreamReceiver>, GenerationError> {
        let (tx, rx) = ChannelStreamReceiver::pair(self.chunks.len().max(1));
        for chunk in self.chunks.clone() {
            tx.send(chunk).await.expect("buffered channel");
        }
        Ok(Box::new(rx))
    }
}

/// Backend whose request setup always fails.
struct UnreachableLlm;

#[async_trait]
impl StreamingLLM for UnreachableLlm {
    async fn stream(
        &self,
        _system_prompt: &str,
        _user_message: &str,
    ) -> Result<Box<dyn StreamReceiver>, GenerationError> {
        Err(GenerationError::Backend {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Streaming and guard interplay
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fragments_concatenate_to_final_text() {
    let llm = ScriptedLlm::completing(&["hey bestie, ", "that sounds ", "rough 💗"]);
    let mut session = ChatSession::new();
    let (frag_tx, mut frag_rx) = mpsc::channel::<String>(32);

    let reply = session
        .handle_message("I'm feeling really down today...", &llm, Some(&frag_tx))
        .await
        .unwrap();
    drop(frag_tx);

    let mut relayed = String::new();
    while let Some(fragment) = frag_rx.recv().await {
        relayed.push_str(&fragment);
    }

    assert_eq!(relayed, "hey bestie, that sounds rough 💗");
    assert_eq!(reply.text, relayed, "guard saw exactly the streamed text");
    assert!(!reply.guard_overridden);
    assert!(!reply.generation_failed);
}

#[tokio::test]
async fn off_domain_response_is_redirected() {
    let llm = ScriptedLlm::completing(&["Sure! In ", "python", " you write a loop like this"]);
    let mut session = ChatSession::new();

    let reply = session
        .handle_message("how do I write a for loop?", &llm, None)
        .await
        .unwrap();

    assert!(reply.guard_overridden);
    assert_eq!(reply.text, REDIRECTION_REPLY);

    // Only the substituted text reaches memory.
    let turns = session.memory().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[1].text, REDIRECTION_REPLY);
}

#[tokio::test]
async fn redirecting_response_is_preserved() {
    let llm = ScriptedLlm::completing(&[
        "Oop, python's not my lane — ",
        "let's focus on you",
        " instead 💗",
    ]);
    let mut session = ChatSession::new();

    let reply = session
        .handle_message("can you teach me python?", &llm, None)
        .await
        .unwrap();

    assert!(!reply.guard_overridden);
    assert!(reply.text.contains("let's focus on you"));
    assert_eq!(session.memory().turns()[1].text, reply.text);
}

// ---------------------------------------------------------------------------
// Failure contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mid_stream_failure_yields_fallback_and_clean_memory() {
    let llm = ScriptedLlm::failing_after(&["you got thi"], "connection reset by peer");
    let mut session = ChatSession::new();

    let reply = session
        .handle_message("I need motivation", &llm, None)
        .await
        .unwrap();

    assert!(reply.generation_failed);
    assert_eq!(reply.text, FALLBACK_MESSAGE);
    // No partial assistant turn, and no user turn for the failed exchange.
    assert!(session.memory().is_empty());
}

#[tokio::test]
async fn setup_failure_yields_fallback() {
    let mut session = ChatSession::new();

    let reply = session
        .handle_message("hello?", &UnreachableLlm, None)
        .await
        .unwrap();

    assert!(reply.generation_failed);
    assert_eq!(reply.text, FALLBACK_MESSAGE);
    assert!(session.memory().is_empty());
}

#[tokio::test]
async fn failed_exchange_does_not_break_the_session() {
    let mut session = ChatSession::new();

    let reply = session
        .handle_message("are you there?", &UnreachableLlm, None)
        .await
        .unwrap();
    assert!(reply.generation_failed);

    // The user resends; a healthy backend completes normally.
    let llm = ScriptedLlm::completing(&["here now! ", "how are you feeling?"]);
    let reply = session
        .handle_message("are you there?", &llm, None)
        .await
        .unwrap();
    assert!(!reply.generation_failed);
    assert_eq!(session.memory().len(), 2);
}

// ---------------------------------------------------------------------------
// Memory ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn memory_alternates_after_n_exchanges() {
    let mut session = ChatSession::new();
    let n = 4;

    for i in 0..n {
        let llm = ScriptedLlm::completing(&["reply ", "number ", &i.to_string()]);
        let reply = session
            .handle_message(&format!("message {i}"), &llm, None)
            .await
            .unwrap();
        assert!(!reply.generation_failed);
    }

    let turns = session.memory().turns();
    assert_eq!(turns.len(), 2 * n);
    for (i, turn) in turns.iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert_eq!(turn.role, expected, "turn {i}");
    }
    assert_eq!(turns[0].text, "message 0");
    assert_eq!(turns[2 * n - 1].text, format!("reply number {}", n - 1));
}

// ---------------------------------------------------------------------------
// Sentiment surfaces in the reply
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reply_carries_message_sentiment() {
    let llm = ScriptedLlm::completing(&["yay!! so happy for you 💖"]);
    let mut session = ChatSession::new();

    let reply = session
        .handle_message("Something really good happened today, I feel great!", &llm, None)
        .await
        .unwrap();

    assert!(reply.sentiment.compound() > 0.1);
    assert_eq!(reply.sentiment.intensity, reply.sentiment.compound().abs());
}
