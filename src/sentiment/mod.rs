//! Lexicon-based sentiment classification for incoming user messages.
//!
//! Two independent passes over the text:
//!
//! 1. **Polarity** — valence lexicon scoring with negation and booster
//!    handling, normalized to a compound score in `[-1, 1]`.
//! 2. **Subjectivity** — ratio of opinion-bearing tokens, in `[0, 1]`.
//!
//! Classification is a pure, total, deterministic function of the input
//! text; no side effects, no allocation beyond the result itself. Empty
//! input is valid and classifies as neutral with zero intensity.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

mod lexicon;

use lexicon::{BOOSTERS, NEGATORS, OPINION_MARKERS, VALENCE};

/// Normalization constant for the compound score: `sum / sqrt(sum² + ALPHA)`.
const ALPHA: f64 = 15.0;

/// Polarity multiplier applied when a valence word is negated.
const NEGATION_DAMPEN: f64 = -0.74;

/// Per-exclamation-mark emphasis added in the direction of the raw sum.
const EXCLAMATION_BOOST: f64 = 0.292;

/// How many preceding tokens are scanned for a negator.
const NEGATION_WINDOW: usize = 3;

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Discrete mood label derived from the compound polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl Mood {
    /// Map a compound score to a mood label.
    ///
    /// Thresholds are applied in precedence order, first match wins:
    /// `>= 0.5` very positive, `>= 0.1` positive, `<= -0.5` very negative,
    /// `<= -0.1` negative, otherwise neutral.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= 0.5 {
            Mood::VeryPositive
        } else if compound >= 0.1 {
            Mood::Positive
        } else if compound <= -0.5 {
            Mood::VeryNegative
        } else if compound <= -0.1 {
            Mood::Negative
        } else {
            Mood::Neutral
        }
    }

    /// Snake-case label, as used in the sentiment description string.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::VeryPositive => "very_positive",
            Mood::Positive => "positive",
            Mood::Neutral => "neutral",
            Mood::Negative => "negative",
            Mood::VeryNegative => "very_negative",
        }
    }

    /// Glyph shown next to the mood in the sentiment description.
    pub fn emoji(self) -> &'static str {
        match self {
            Mood::VeryPositive => "🌟",
            Mood::Positive => "😊",
            Mood::Neutral => "😐",
            Mood::Negative => "😔",
            Mood::VeryNegative => "😢",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SentimentResult
// ---------------------------------------------------------------------------

/// Result of a sentiment pass over one message.
///
/// Derived fresh per message and never persisted beyond immediate use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Discrete mood label.
    pub overall: Mood,
    /// `abs(compound)`, in `[0, 1]`.
    pub intensity: f64,
    /// Opinion-bearing token ratio, in `[0, 1]`.
    pub subjectivity: f64,
    /// Named score components: `pos`, `neu`, `neg`, `compound`.
    pub raw_scores: HashMap<String, f64>,
    /// Glyph keyed by `overall`.
    pub emoji: &'static str,
}

impl SentimentResult {
    /// Human-readable description substituted into the persona prompt,
    /// e.g. `"positive (intensity: 0.63, subjectivity: 0.40) 😊"`.
    pub fn description(&self) -> String {
        format!(
            "{} (intensity: {:.2}, subjectivity: {:.2}) {}",
            self.overall, self.intensity, self.subjectivity, self.emoji
        )
    }

    /// The compound polarity score this result was classified from.
    pub fn compound(&self) -> f64 {
        self.raw_scores.get("compound").copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Analyze the sentiment of the input text.
///
/// Deterministic given identical input text and lexicon. Empty or
/// whitespace-only text yields a neutral result with zero intensity.
pub fn analyze(text: &str) -> SentimentResult {
    let tokens = tokenize(text);

    let mut sum = 0.0;
    let mut pos = 0.0;
    let mut neg = 0.0;
    let mut neutral_hits = 0usize;
    let mut subjective_hits = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(valence) = word_valence(token) else {
            if is_opinion_marker(token) {
                subjective_hits += 1;
            } else {
                neutral_hits += 1;
            }
            continue;
        };

        subjective_hits += 1;

        let mut scored = valence;

        // Degree modifier directly before the word.
        if i > 0 {
            if let Some(boost) = booster_increment(&tokens[i - 1]) {
                scored += if scored >= 0.0 { boost } else { -boost };
            }
        }

        // Negation within the preceding window flips and dampens.
        let window_start = i.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..i].iter().any(|t| is_negator(t)) {
            scored *= NEGATION_DAMPEN;
        }

        if scored > 0.0 {
            pos += scored;
        } else {
            neg += -scored;
        }
        sum += scored;
    }

    // Exclamation marks amplify whatever direction the text already leans.
    let bangs = text.matches('!').count().min(4) as f64;
    if sum > 0.0 {
        sum += bangs * EXCLAMATION_BOOST;
    } else if sum < 0.0 {
        sum -= bangs * EXCLAMATION_BOOST;
    }

    let compound = normalize(sum);
    let overall = Mood::from_compound(compound);

    let total_weight = pos + neg + neutral_hits as f64;
    let (pos_share, neu_share, neg_share) = if total_weight > 0.0 {
        (
            pos / total_weight,
            neutral_hits as f64 / total_weight,
            neg / total_weight,
        )
    } else {
        (0.0, 1.0, 0.0)
    };

    let subjectivity = if tokens.is_empty() {
        0.0
    } else {
        (subjective_hits as f64 / tokens.len() as f64).clamp(0.0, 1.0)
    };

    let mut raw_scores = HashMap::new();
    raw_scores.insert("pos".to_string(), pos_share);
    raw_scores.insert("neu".to_string(), neu_share);
    raw_scores.insert("neg".to_string(), neg_share);
    raw_scores.insert("compound".to_string(), compound);

    SentimentResult {
        overall,
        intensity: compound.abs(),
        subjectivity,
        raw_scores,
        emoji: overall.emoji(),
    }
}

/// Normalize a raw valence sum to `[-1, 1]`.
fn normalize(sum: f64) -> f64 {
    let norm = sum / (sum * sum + ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

/// Lowercase alphabetic tokens; apostrophes are dropped so contractions
/// match the negator table ("don't" → "dont").
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|t| t.replace('\'', ""))
        .filter(|t| !t.is_empty())
        .collect()
}

fn word_valence(token: &str) -> Option<f64> {
    VALENCE
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, v)| *v)
}

fn booster_increment(token: &str) -> Option<f64> {
    BOOSTERS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, b)| *b)
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token)
}

fn is_opinion_marker(token: &str) -> bool {
    OPINION_MARKERS.contains(&token)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── Threshold table ─────────────────────────────────────────────────

    #[test]
    fn classification_boundaries_exact() {
        assert_eq!(Mood::from_compound(0.5), Mood::VeryPositive);
        assert_eq!(Mood::from_compound(0.1), Mood::Positive);
        assert_eq!(Mood::from_compound(-0.1), Mood::Negative);
        assert_eq!(Mood::from_compound(-0.5), Mood::VeryNegative);
    }

    #[test]
    fn classification_between_boundaries() {
        assert_eq!(Mood::from_compound(0.75), Mood::VeryPositive);
        assert_eq!(Mood::from_compound(0.49), Mood::Positive);
        assert_eq!(Mood::from_compound(0.09), Mood::Neutral);
        assert_eq!(Mood::from_compound(0.0), Mood::Neutral);
        assert_eq!(Mood::from_compound(-0.09), Mood::Neutral);
        assert_eq!(Mood::from_compound(-0.49), Mood::Negative);
        assert_eq!(Mood::from_compound(-0.75), Mood::VeryNegative);
    }

    #[test]
    fn classification_is_total() {
        // Any float maps to some mood without panicking.
        for c in [-1.0, -0.5001, -0.4999, -0.1001, 0.0999, 0.1001, 0.4999, 1.0] {
            let _ = Mood::from_compound(c);
        }
    }

    // ── Intensity ───────────────────────────────────────────────────────

    #[test]
    fn intensity_is_abs_compound() {
        for text in [
            "I feel really happy and grateful today!",
            "Everything is terrible and I feel hopeless",
            "The bus arrives at nine",
            "",
        ] {
            let result = analyze(text);
            assert!((result.intensity - result.compound().abs()).abs() < 1e-12);
        }
    }

    // ── Polarity ────────────────────────────────────────────────────────

    #[test]
    fn positive_text_scores_positive() {
        let result = analyze("Something really good happened today, I feel great!");
        assert!(result.compound() > 0.1);
        assert!(matches!(
            result.overall,
            Mood::Positive | Mood::VeryPositive
        ));
    }

    #[test]
    fn strongly_positive_text_is_very_positive() {
        let result = analyze("This is amazing, I love it! Absolutely wonderful and fantastic!");
        assert_eq!(result.overall, Mood::VeryPositive);
    }

    #[test]
    fn negative_text_scores_negative() {
        let result = analyze("I'm feeling really down and sad today");
        assert!(result.compound() < -0.1);
    }

    #[test]
    fn strongly_negative_text_is_very_negative() {
        let result = analyze("Everything is terrible, I feel hopeless and miserable and heartbroken");
        assert_eq!(result.overall, Mood::VeryNegative);
    }

    #[test]
    fn plain_text_is_neutral() {
        let result = analyze("The meeting starts at three on Tuesday");
        assert_eq!(result.overall, Mood::Neutral);
    }

    #[test]
    fn negation_flips_polarity() {
        let positive = analyze("I am happy");
        let negated = analyze("I am not happy");
        assert!(positive.compound() > 0.0);
        assert!(negated.compound() < 0.0);
    }

    #[test]
    fn booster_increases_magnitude() {
        let plain = analyze("I am happy");
        let boosted = analyze("I am extremely happy");
        assert!(boosted.compound() > plain.compound());
    }

    #[test]
    fn exclamation_amplifies() {
        let plain = analyze("I am happy");
        let excited = analyze("I am happy!!!");
        assert!(excited.compound() > plain.compound());
    }

    #[test]
    fn determinism() {
        let a = analyze("I'm so proud of myself, I finally did it!");
        let b = analyze("I'm so proud of myself, I finally did it!");
        assert_eq!(a.compound(), b.compound());
        assert_eq!(a.subjectivity, b.subjectivity);
        assert_eq!(a.overall, b.overall);
    }

    // ── Edge cases ──────────────────────────────────────────────────────

    #[test]
    fn empty_text_is_neutral_zero_intensity() {
        let result = analyze("");
        assert_eq!(result.overall, Mood::Neutral);
        assert_eq!(result.intensity, 0.0);
        assert_eq!(result.subjectivity, 0.0);
        assert_eq!(result.emoji, "😐");
    }

    #[test]
    fn whitespace_only_is_neutral() {
        let result = analyze("   \n\t  ");
        assert_eq!(result.overall, Mood::Neutral);
        assert_eq!(result.intensity, 0.0);
    }

    // ── Subjectivity ────────────────────────────────────────────────────

    #[test]
    fn subjectivity_in_unit_range() {
        for text in ["I feel I think I believe", "rocks and trees", ""] {
            let s = analyze(text).subjectivity;
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn first_person_text_more_subjective() {
        let objective = analyze("The train departs from platform four");
        let subjective = analyze("I honestly feel like I want this so much");
        assert!(subjective.subjectivity > objective.subjectivity);
    }

    // ── Result shape ────────────────────────────────────────────────────

    #[test]
    fn raw_scores_components_present() {
        let result = analyze("I feel good");
        for key in ["pos", "neu", "neg", "compound"] {
            assert!(result.raw_scores.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn emoji_total_over_moods() {
        for mood in [
            Mood::VeryPositive,
            Mood::Positive,
            Mood::Neutral,
            Mood::Negative,
            Mood::VeryNegative,
        ] {
            assert!(!mood.emoji().is_empty());
        }
    }

    #[test]
    fn description_format() {
        let result = analyze("I feel really happy and grateful today!");
        let desc = result.description();
        assert!(desc.starts_with(result.overall.as_str()));
        assert!(desc.contains("(intensity: "));
        assert!(desc.contains("subjectivity: "));
        assert!(desc.ends_with(result.emoji));
    }
}
