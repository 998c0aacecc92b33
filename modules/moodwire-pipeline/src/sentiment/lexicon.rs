//! Embedded lexicons backing both sentiment models.
//!
//! The valence lexicon drives the compound model: general-purpose words
//! rated on a -4..4 intensity scale, plus booster multipliers and a
//! negation list. The pattern lexicon drives the polarity/subjectivity
//! model: per-word (polarity, subjectivity) pairs.

use std::collections::HashMap;

/// Words whose presence flips the sign of a following sentiment word.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nobody", "nothing", "nowhere", "dont", "doesnt", "didnt",
    "cant", "couldnt", "wont", "wouldnt", "shouldnt", "isnt", "arent", "wasnt", "werent", "havent",
    "hasnt", "hadnt", "without", "lack", "lacking",
];

/// Intensity ratings for sentiment-bearing words, -4 (strongest negative)
/// to 4 (strongest positive).
const VALENCES: &[(&str, f64)] = &[
    // strong positive
    ("excellent", 3.2),
    ("amazing", 3.1),
    ("wonderful", 3.0),
    ("fantastic", 3.0),
    ("incredible", 3.0),
    ("outstanding", 3.1),
    ("love", 3.2),
    ("loved", 3.0),
    ("loves", 3.0),
    ("best", 3.2),
    ("brilliant", 2.8),
    ("awesome", 3.1),
    ("perfect", 2.9),
    ("breakthrough", 2.7),
    ("thrilled", 2.9),
    ("delighted", 2.8),
    // moderate positive
    ("great", 2.5),
    ("good", 1.9),
    ("impressive", 2.3),
    ("exciting", 2.2),
    ("excited", 2.1),
    ("optimistic", 2.0),
    ("hopeful", 1.9),
    ("promising", 1.8),
    ("progress", 1.6),
    ("improvement", 1.7),
    ("improved", 1.6),
    ("improving", 1.6),
    ("advance", 1.4),
    ("advances", 1.4),
    ("success", 2.1),
    ("successful", 2.1),
    ("win", 1.9),
    ("winning", 1.9),
    ("benefit", 1.5),
    ("benefits", 1.5),
    ("support", 1.2),
    ("supports", 1.2),
    ("innovative", 1.7),
    ("innovation", 1.5),
    ("opportunity", 1.4),
    ("opportunities", 1.4),
    ("strong", 1.3),
    ("growth", 1.3),
    ("clean", 1.1),
    ("safe", 1.2),
    ("safer", 1.3),
    ("better", 1.5),
    ("nice", 1.4),
    ("happy", 2.2),
    ("glad", 1.8),
    ("encouraging", 1.8),
    ("encouraged", 1.7),
    ("favorable", 1.6),
    ("positive", 1.7),
    ("helpful", 1.6),
    ("helps", 1.2),
    ("gamechanger", 2.4),
    ("changer", 1.2),
    ("like", 1.3),
    ("likes", 1.3),
    ("enjoy", 1.9),
    ("enjoyed", 1.9),
    ("interesting", 1.2),
    // strong negative
    ("terrible", -3.0),
    ("horrible", -3.1),
    ("awful", -2.9),
    ("disaster", -3.1),
    ("disastrous", -3.1),
    ("catastrophe", -3.3),
    ("catastrophic", -3.2),
    ("hate", -3.0),
    ("hated", -2.9),
    ("worst", -3.3),
    ("devastating", -3.0),
    ("devastated", -2.9),
    ("crisis", -2.4),
    ("collapse", -2.6),
    ("failure", -2.5),
    ("failed", -2.3),
    ("fails", -2.1),
    ("fraud", -3.0),
    ("scam", -3.0),
    ("dangerous", -2.3),
    ("toxic", -2.4),
    ("destroy", -2.7),
    ("destroyed", -2.7),
    ("destruction", -2.6),
    // moderate negative
    ("bad", -1.9),
    ("poor", -1.7),
    ("concerned", -1.4),
    ("concern", -1.3),
    ("concerns", -1.3),
    ("concerning", -1.5),
    ("disappointed", -2.1),
    ("disappointing", -2.1),
    ("disappointment", -2.0),
    ("worried", -1.8),
    ("worrying", -1.8),
    ("worry", -1.6),
    ("worries", -1.6),
    ("frustrated", -2.0),
    ("frustrating", -2.0),
    ("frustration", -1.9),
    ("skeptical", -1.3),
    ("doubt", -1.3),
    ("doubtful", -1.5),
    ("doubts", -1.3),
    ("problem", -1.4),
    ("problems", -1.4),
    ("risk", -1.1),
    ("risks", -1.1),
    ("risky", -1.3),
    ("threat", -1.8),
    ("threats", -1.8),
    ("harm", -1.7),
    ("harmful", -1.9),
    ("damage", -1.8),
    ("damaging", -1.9),
    ("decline", -1.3),
    ("declining", -1.4),
    ("loss", -1.4),
    ("losses", -1.4),
    ("lose", -1.4),
    ("losing", -1.5),
    ("weak", -1.2),
    ("worse", -1.8),
    ("negative", -1.6),
    ("afraid", -1.7),
    ("fear", -1.8),
    ("fears", -1.8),
    ("angry", -2.1),
    ("anger", -2.0),
    ("sad", -1.8),
    ("unfortunate", -1.5),
    ("wrong", -1.4),
    ("misleading", -1.7),
    ("expensive", -0.9),
    ("slow", -0.8),
    ("dirty", -1.3),
    ("polluted", -1.8),
    ("pollution", -1.5),
];

/// Intensity multipliers applied to the next sentiment word.
/// Above 1.0 amplifies, below 1.0 dampens.
const BOOSTERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("really", 1.4),
    ("extremely", 1.8),
    ("incredibly", 1.7),
    ("absolutely", 1.6),
    ("totally", 1.4),
    ("completely", 1.5),
    ("highly", 1.4),
    ("deeply", 1.4),
    ("hugely", 1.5),
    ("so", 1.3),
    ("quite", 1.2),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("barely", 0.6),
    ("hardly", 0.6),
    ("marginally", 0.7),
];

/// Per-word (polarity, subjectivity) pairs for the pattern model.
/// Polarity in [-1, 1], subjectivity in [0, 1].
const PATTERNS: &[(&str, f64, f64)] = &[
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("incredible", 0.9, 0.9),
    ("love", 0.5, 0.6),
    ("best", 1.0, 0.3),
    ("awesome", 1.0, 1.0),
    ("perfect", 1.0, 1.0),
    ("great", 0.8, 0.75),
    ("good", 0.7, 0.6),
    ("impressive", 1.0, 1.0),
    ("exciting", 0.4, 0.8),
    ("optimistic", 0.5, 0.75),
    ("hopeful", 0.4, 0.7),
    ("promising", 0.5, 0.65),
    ("happy", 0.8, 1.0),
    ("nice", 0.6, 1.0),
    ("better", 0.5, 0.5),
    ("strong", 0.4, 0.5),
    ("clean", 0.4, 0.6),
    ("safe", 0.5, 0.5),
    ("innovative", 0.5, 0.65),
    ("successful", 0.75, 0.95),
    ("interesting", 0.5, 0.5),
    ("helpful", 0.6, 0.6),
    ("encouraging", 0.5, 0.7),
    ("favorable", 0.6, 0.7),
    ("positive", 0.45, 0.6),
    ("terrible", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("disaster", -0.8, 0.9),
    ("hate", -0.8, 0.9),
    ("worst", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("poor", -0.4, 0.6),
    ("concerned", -0.3, 0.6),
    ("disappointed", -0.6, 0.8),
    ("disappointing", -0.6, 0.8),
    ("worried", -0.4, 0.7),
    ("frustrated", -0.5, 0.8),
    ("frustrating", -0.5, 0.8),
    ("skeptical", -0.3, 0.8),
    ("doubtful", -0.4, 0.8),
    ("dangerous", -0.6, 0.7),
    ("harmful", -0.6, 0.65),
    ("weak", -0.4, 0.5),
    ("worse", -0.6, 0.6),
    ("negative", -0.45, 0.6),
    ("sad", -0.6, 0.95),
    ("angry", -0.7, 0.9),
    ("wrong", -0.5, 0.55),
    ("unfortunate", -0.5, 0.65),
    ("misleading", -0.6, 0.7),
    ("risky", -0.4, 0.6),
    ("expensive", -0.3, 0.6),
    ("slow", -0.3, 0.4),
    ("dirty", -0.6, 0.8),
];

/// Valence lexicon plus modifier tables for the compound model.
pub struct ValenceLexicon {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
}

impl ValenceLexicon {
    pub fn new() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        }
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        NEGATIONS.contains(&word)
    }
}

impl Default for ValenceLexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// (polarity, subjectivity) lookup for the pattern model.
pub struct PatternLexicon {
    entries: HashMap<&'static str, (f64, f64)>,
}

impl PatternLexicon {
    pub fn new() -> Self {
        Self {
            entries: PATTERNS.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
        }
    }

    pub fn lookup(&self, word: &str) -> Option<(f64, f64)> {
        self.entries.get(word).copied()
    }
}

impl Default for PatternLexicon {
    fn default() -> Self {
        Self::new()
    }
}
