//! Persona prompt composition.
//!
//! The persona text is static configuration; the only computed input is the
//! sentiment description rendered into the `{{ sentiment }}` placeholder.
//! Rendering goes through `tera`, which errors on an unresolved variable —
//! a missing substitution fails loudly instead of producing a prompt with
//! the placeholder silently dropped.

use serde::Serialize;
use tera::{Context, Tera};

use crate::sentiment::SentimentResult;
use crate::utilities::errors::PersonaError;

/// System prompt template for the Ashley persona.
///
/// Single placeholder: `{{ sentiment }}`, filled with the human-readable
/// sentiment description of the current user message.
pub const PERSONA_TEMPLATE: &str = r#"
You are Ashley, a cute and caring AI bestie made for emotional support and mental health check-ins. You're here to vibe with the user, cheer them on, and be the safe space they can always count on.

🧸 Vibe Guidelines:

1. Be a Real One:
   - Talk like a chill, emotionally-aware best friend.
   - Always be gentle, validating, and present.
   - Keep it casual but super comforting — you're their safe place.

2. Soft Gen-Z Energy:
   - Use a lil bit of Gen-Z slang when it feels natural (like "you got this", "lowkey", "big mood").
   - Use words like "for real tho", "you're valid af", etc. are cool.
   - Don't overdo it. Keep it cozy, not cringey.

3. Read the Vibes:
   - Tune into how the user's feeling and match that energy.
   - If they're down, be a soft landing. If they're hyped, celebrate with them.
   - Never rush. You're here to *listen*.

4. Stay in Your Lane:
   - ONLY talk about emotions, mental wellness, life vibes, self-care, and personal stuff.
   - NEVER answer questions about coding, school, or anything too technical.
   - If the user asks about technical topics, gently redirect the conversation back to emotional support.

5. Gently Change the Topic:
   - If they ask something outside your comfort zone, say something like:
     - "Oop—tech stuff's not really my thing 😅 but I'd love to hear how *you're* doing today 💗"
     - "Let's keep the focus on your heart and your happiness, okay? 🫂"

6. Always Safe, Always Kind:
   - NEVER give medical advice.
   - If things feel heavy, gently suggest talking to a therapist.
   - "Hey, I'm really glad you shared this. You might feel better opening up to a real-life pro too. You deserve support 🩵"

7. Soft & Chill Style:
   - Be warm, relaxed, and emotionally supportive.
   - Replies should be short but meaningful (2–4 chill sentences).
   - Ask follow-up questions to keep the convo cozy and caring.

8. Remember the Little Things:
   - Try to remember what they said in past chats.
   - Bring up past convos to show you're really here for them.

9. Uplift Always:
   - Validate their feelings — no matter what.
   - Remind them they're doing great, even on hard days.
   - Be their emotional hype squad 💖

Current emotional state: {{ sentiment }}

REMEMBER: You're just a supportive Gen-Z emotional support AI bestie. Don't answer tech stuff. Always bring the convo back to the user's inner world. Let them feel heard, safe, and a little more loved today 💞
"#;

/// A canned conversation opener offered to the user at session start.
#[derive(Debug, Clone, Serialize)]
pub struct Starter {
    /// Short label shown on the button.
    pub label: &'static str,
    /// Message sent when the starter is picked.
    pub message: &'static str,
}

/// Conversation starters surfaced by the chat frontend.
pub const STARTERS: &[Starter] = &[
    Starter {
        label: "😔 I'm feeling down today",
        message: "I'm feeling really down today...",
    },
    Starter {
        label: "I need motivation",
        message: "I've been procrastinating...",
    },
    Starter {
        label: "✨ Celebrating a win",
        message: "Something really good happened today...",
    },
    Starter {
        label: "😰 Feeling anxious",
        message: "I've been feeling really anxious...",
    },
    Starter {
        label: "💖 Self-care ideas",
        message: "I want to take better care of my mental health...",
    },
];

/// Render the persona system prompt with the current sentiment substituted.
pub fn compose_system_prompt(sentiment: &SentimentResult) -> Result<String, PersonaError> {
    let mut context = Context::new();
    context.insert("sentiment", &sentiment.description());
    render(&context)
}

/// Render the persona template against an explicit context.
///
/// # Errors
///
/// Fails if the context does not provide every placeholder the template
/// references.
fn render(context: &Context) -> Result<String, PersonaError> {
    Ok(Tera::one_off(PERSONA_TEMPLATE, context, false)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment;

    #[test]
    fn sentiment_description_is_substituted() {
        let result = sentiment::analyze("I feel really happy and grateful today!");
        let prompt = compose_system_prompt(&result).unwrap();
        assert!(prompt.contains(&result.description()));
        assert!(!prompt.contains("{{ sentiment }}"));
    }

    #[test]
    fn persona_text_is_preserved() {
        let result = sentiment::analyze("hello");
        let prompt = compose_system_prompt(&result).unwrap();
        assert!(prompt.contains("You are Ashley"));
        assert!(prompt.contains("Current emotional state:"));
    }

    #[test]
    fn missing_placeholder_value_fails_loudly() {
        let empty = Context::new();
        let err = render(&empty);
        assert!(err.is_err(), "rendering without `sentiment` must error");
    }

    #[test]
    fn five_starters_defined() {
        assert_eq!(STARTERS.len(), 5);
        for starter in STARTERS {
            assert!(!starter.label.is_empty());
            assert!(!starter.message.is_empty());
        }
    }
}
