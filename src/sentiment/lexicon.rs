//! Valence and subjectivity word tables for the sentiment scorer.
//!
//! Valence values are on a `[-4.0, 4.0]` scale, matching the convention of
//! lexicon-based polarity raters. The tables are deliberately small: they
//! cover the emotional-support vocabulary this agent actually sees, not
//! general-purpose text.

/// (word, valence) pairs. Positive values are pleasant, negative unpleasant.
pub const VALENCE: &[(&str, f64)] = &[
    // Strongly positive
    ("amazing", 3.2),
    ("awesome", 3.1),
    ("best", 3.2),
    ("brilliant", 3.0),
    ("delighted", 3.0),
    ("ecstatic", 3.4),
    ("excellent", 3.2),
    ("fantastic", 3.3),
    ("incredible", 3.0),
    ("love", 3.2),
    ("loved", 3.0),
    ("overjoyed", 3.3),
    ("perfect", 3.1),
    ("thrilled", 3.2),
    ("wonderful", 3.1),
    // Positive
    ("better", 1.9),
    ("calm", 1.5),
    ("cared", 2.0),
    ("caring", 2.2),
    ("celebrate", 2.4),
    ("cheerful", 2.3),
    ("comfort", 1.9),
    ("comforting", 2.1),
    ("confident", 2.2),
    ("encouraged", 1.9),
    ("enjoy", 2.0),
    ("enjoyed", 2.1),
    ("excited", 2.4),
    ("glad", 2.1),
    ("good", 1.9),
    ("grateful", 2.3),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("hope", 1.9),
    ("hopeful", 2.0),
    ("joy", 2.8),
    ("kind", 2.0),
    ("motivated", 1.9),
    ("nice", 1.8),
    ("okay", 0.9),
    ("optimistic", 2.0),
    ("peaceful", 2.1),
    ("proud", 2.2),
    ("relaxed", 1.8),
    ("relieved", 1.9),
    ("safe", 1.7),
    ("strong", 1.6),
    ("supported", 1.9),
    ("thankful", 2.3),
    ("thanks", 1.9),
    ("valued", 2.0),
    ("warm", 1.7),
    ("win", 2.4),
    ("won", 2.3),
    // Negative
    ("afraid", -2.2),
    ("alone", -1.8),
    ("annoyed", -1.8),
    ("anxious", -2.1),
    ("ashamed", -2.2),
    ("bad", -2.5),
    ("bored", -1.3),
    ("broken", -2.1),
    ("cried", -2.2),
    ("crying", -2.3),
    ("disappointed", -2.1),
    ("down", -1.6),
    ("drained", -1.8),
    ("empty", -1.8),
    ("exhausted", -1.9),
    ("failed", -2.3),
    ("failure", -2.5),
    ("fear", -2.2),
    ("frustrated", -2.1),
    ("guilty", -2.1),
    ("hurt", -2.2),
    ("hurts", -2.2),
    ("ignored", -1.9),
    ("lonely", -2.2),
    ("lost", -1.7),
    ("nervous", -1.9),
    ("overwhelmed", -2.0),
    ("pressure", -1.4),
    ("sad", -2.1),
    ("scared", -2.2),
    ("stressed", -2.2),
    ("struggling", -2.0),
    ("stuck", -1.5),
    ("tired", -1.4),
    ("unhappy", -2.3),
    ("upset", -2.1),
    ("worried", -2.0),
    ("worse", -2.1),
    ("worthless", -2.9),
    // Strongly negative
    ("awful", -3.1),
    ("depressed", -3.0),
    ("devastated", -3.3),
    ("hate", -3.1),
    ("hated", -3.0),
    ("heartbroken", -3.2),
    ("helpless", -2.8),
    ("hopeless", -3.0),
    ("horrible", -3.1),
    ("miserable", -3.0),
    ("terrible", -3.1),
    ("unbearable", -3.0),
];

/// Degree modifiers. The increment is added toward the sign of the word
/// they precede ("very good" scores higher than "good", "slightly good"
/// lower).
pub const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.35),
    ("completely", 0.35),
    ("deeply", 0.30),
    ("extremely", 0.40),
    ("incredibly", 0.40),
    ("really", 0.29),
    ("so", 0.29),
    ("super", 0.30),
    ("totally", 0.30),
    ("very", 0.29),
    ("barely", -0.30),
    ("hardly", -0.30),
    ("kinda", -0.25),
    ("little", -0.25),
    ("slightly", -0.30),
    ("somewhat", -0.25),
];

/// Words that flip the polarity of a nearby valence word.
pub const NEGATORS: &[&str] = &[
    "aint", "cannot", "cant", "couldnt", "dont", "didnt", "doesnt", "isnt",
    "never", "no", "none", "not", "nothing", "shouldnt", "wasnt", "werent",
    "wont", "wouldnt",
];

/// Opinion markers that signal subjective (first-person, evaluative) text
/// without carrying polarity themselves.
pub const OPINION_MARKERS: &[&str] = &[
    "believe", "feel", "feeling", "feels", "felt", "guess", "honestly",
    "i", "im", "me", "my", "myself", "personally", "seem", "seems",
    "suppose", "think", "thought", "want", "wish",
];
