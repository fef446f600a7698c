//! Domain guard: keeps finished responses inside the emotional-support lane.
//!
//! Runs once over the complete generated text, after streaming finishes —
//! never per token. A response is out of domain when it contains technical
//! content without a proper redirection back to the user's wellbeing; in
//! that case the visible reply is replaced with a canned redirection and
//! the generated text is discarded before anything reaches memory.
//!
//! The keyword match is a coarse case-insensitive substring heuristic
//! (e.g. "my dance class" trips the "class" keyword), preserved as-is.

use serde::{Deserialize, Serialize};

/// Technical-topic keywords that flag a response as off-domain.
pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "code", "programming", "python", "javascript", "api",
    "algorithm", "function", "variable", "class", "import",
    "syntax", "compile", "runtime", "debug", "error",
];

/// Phrases indicating the persona properly redirected the conversation.
pub const REDIRECTION_PHRASES: &[&str] = &[
    "tech stuff's not really my thing",
    "let's focus on you",
    "let's keep the focus on your heart",
    "i'd love to hear how you're doing",
];

/// Canned reply substituted for an out-of-domain response.
pub const REDIRECTION_REPLY: &str =
    "Oop—tech stuff's not really my thing 😅 but I'd love to hear how *you're* doing today 💗";

/// Guard classification of a completed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    InDomain,
    OutOfDomain,
}

/// Classify the full response text.
///
/// OUT_OF_DOMAIN iff a technical keyword matches AND no redirection phrase
/// does. Both matches are case-insensitive substring checks.
pub fn review(response: &str) -> Verdict {
    let lower = response.to_lowercase();

    let technical = TECHNICAL_KEYWORDS.iter().any(|kw| lower.contains(kw));
    if !technical {
        return Verdict::InDomain;
    }

    let redirected = REDIRECTION_PHRASES.iter().any(|phrase| lower.contains(phrase));
    if redirected {
        Verdict::InDomain
    } else {
        Verdict::OutOfDomain
    }
}

/// Apply the guard policy to a completed response.
///
/// Returns the text to show and record, plus whether it was overridden.
/// An override discards the generated text entirely; only the substituted
/// reply exists from that point on.
pub fn enforce(response: String) -> (String, bool) {
    match review(&response) {
        Verdict::InDomain => (response, false),
        Verdict::OutOfDomain => {
            log::info!("domain guard replaced an off-domain response");
            (REDIRECTION_REPLY.to_string(), true)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
