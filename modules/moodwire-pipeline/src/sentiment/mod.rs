//! Dual-model sentiment scoring.
//!
//! Model A (compound): lexicon valences with negation and booster handling,
//! summed and squashed into [-1, 1]; also yields the positive/negative/
//! neutral token-mass fractions that always sum to 1. Model B (pattern):
//! averaged per-word polarity and subjectivity, carried through for
//! downstream use but never consulted for categorization.

pub mod lexicon;

use anyhow::{bail, Result};
use moodwire_common::{MoodwireError, SentimentCategory, SentimentScores};
use tracing::warn;

use crate::artifact::Table;
use crate::normalize::normalize;
use lexicon::{PatternLexicon, ValenceLexicon};

/// Squashing constant for the compound score: `sum / sqrt(sum² + ALPHA)`.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// How many tokens after a negation still get their sign flipped.
const NEGATION_WINDOW: usize = 3;

/// Sign flip applied under negation, with damping: "not great" reads less
/// negative than "terrible".
const NEGATION_FACTOR: f64 = -0.8;

/// Candidate names for the free-text column, tried in order.
pub const TEXT_COLUMNS: [&str; 2] = ["text", "body"];

/// Columns appended to a batch by scoring, in order.
pub const SENTIMENT_HEADERS: [&str; 8] = [
    "cleaned_text",
    "vader_compound",
    "vader_positive",
    "vader_negative",
    "vader_neutral",
    "textblob_polarity",
    "textblob_subjectivity",
    "sentiment_category",
];

/// A single scoring model. The seam exists so batch processing can be
/// tested against a failing model; production code uses [`Analyzer`].
pub trait SentimentModel {
    fn score(&self, text: &str) -> Result<SentimentScores>;
}

/// Both sentiment models behind one handle. Build once per process and
/// pass by reference into [`process`]; construction allocates the
/// lexicon tables.
pub struct Analyzer {
    valence: ValenceLexicon,
    pattern: PatternLexicon,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            valence: ValenceLexicon::new(),
            pattern: PatternLexicon::new(),
        }
    }

    /// Model A: compound score plus the three token-mass fractions.
    fn compound_scores(&self, text: &str) -> (f64, f64, f64, f64) {
        let mut valences: Vec<f64> = Vec::new();
        let mut booster = 1.0;
        let mut negation_left = 0usize;

        for token in text.split_whitespace() {
            if self.valence.is_negation(token) {
                negation_left = NEGATION_WINDOW;
                valences.push(0.0);
                continue;
            }
            if let Some(b) = self.valence.booster(token) {
                booster = b;
                valences.push(0.0);
                continue;
            }
            match self.valence.valence(token) {
                Some(v) => {
                    let mut v = v * booster;
                    if negation_left > 0 {
                        v *= NEGATION_FACTOR;
                        negation_left = 0;
                    }
                    valences.push(v);
                    booster = 1.0;
                }
                None => valences.push(0.0),
            }
            negation_left = negation_left.saturating_sub(1);
        }

        let sum: f64 = valences.iter().sum();
        let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos = 0.0;
        let mut neg = 0.0;
        let mut neu = 0.0;
        for v in &valences {
            if *v > 0.0 {
                pos += v + 1.0;
            } else if *v < 0.0 {
                neg += v.abs() + 1.0;
            } else {
                neu += 1.0;
            }
        }
        let total = pos + neg + neu;
        if total == 0.0 {
            // Nothing to weigh: empty or whitespace-only text is neutral.
            return (0.0, 0.0, 0.0, 1.0);
        }
        (compound, pos / total, neg / total, neu / total)
    }

    /// Model B: averaged polarity and subjectivity of matched words.
    fn pattern_scores(&self, text: &str) -> (f64, f64) {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut matched = 0usize;
        let mut booster = 1.0;
        let mut negation_left = 0usize;

        for token in text.split_whitespace() {
            if self.valence.is_negation(token) {
                negation_left = NEGATION_WINDOW;
                continue;
            }
            if let Some(b) = self.valence.booster(token) {
                booster = b;
                continue;
            }
            if let Some((p, s)) = self.pattern.lookup(token) {
                let mut p = p * booster;
                if negation_left > 0 {
                    p *= -0.5;
                    negation_left = 0;
                }
                polarity_sum += p;
                subjectivity_sum += s;
                matched += 1;
                booster = 1.0;
            }
            negation_left = negation_left.saturating_sub(1);
        }

        if matched == 0 {
            return (0.0, 0.0);
        }
        let n = matched as f64;
        (
            (polarity_sum / n).clamp(-1.0, 1.0),
            (subjectivity_sum / n).clamp(0.0, 1.0),
        )
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentModel for Analyzer {
    fn score(&self, text: &str) -> Result<SentimentScores> {
        let (compound, positive, negative, neutral) = self.compound_scores(text);
        let (polarity, subjectivity) = self.pattern_scores(text);

        if !compound.is_finite() || !polarity.is_finite() {
            bail!("non-finite sentiment for text starting {:?}", excerpt(text));
        }

        Ok(SentimentScores {
            compound,
            positive,
            negative,
            neutral,
            polarity,
            subjectivity,
            category: SentimentCategory::from_compound(compound),
            fallback: false,
        })
    }
}

/// One scored record: the original row, its normalized text, and both
/// models' output.
#[derive(Debug, Clone)]
pub struct ScoredItem {
    pub row: Vec<String>,
    pub cleaned_text: String,
    pub scores: SentimentScores,
}

/// Resolve the free-text column by trying [`TEXT_COLUMNS`] in priority
/// order, once per batch.
pub fn resolve_text_column(table: &Table) -> Result<usize, MoodwireError> {
    TEXT_COLUMNS
        .iter()
        .find_map(|name| table.column_index(name))
        .ok_or_else(|| MoodwireError::Schema {
            candidates: TEXT_COLUMNS.iter().map(|s| s.to_string()).collect(),
            headers: table.headers.clone(),
        })
}

/// Score every record of a batch, preserving order.
///
/// A model failure on one item substitutes the fixed neutral fallback and
/// continues; only a missing free-text column aborts the batch.
pub fn process(table: &Table, model: &dyn SentimentModel) -> Result<Vec<ScoredItem>, MoodwireError> {
    let text_col = resolve_text_column(table)?;

    let mut scored = Vec::with_capacity(table.len());
    for row in &table.rows {
        let text = row.get(text_col).map(String::as_str).unwrap_or("");
        let cleaned = normalize(text);
        let scores = match model.score(&cleaned) {
            Ok(s) => s,
            Err(e) => {
                warn!(
                    excerpt = %excerpt(&cleaned),
                    error = %e,
                    "Scoring failed, substituting neutral fallback"
                );
                SentimentScores::neutral_fallback()
            }
        };
        scored.push(ScoredItem {
            row: row.clone(),
            cleaned_text: cleaned,
            scores,
        });
    }
    Ok(scored)
}

/// Assemble the scored batch: original columns plus [`SENTIMENT_HEADERS`].
pub fn scored_table(input: &Table, items: &[ScoredItem]) -> Table {
    let mut headers = input.headers.clone();
    headers.extend(SENTIMENT_HEADERS.iter().map(|h| h.to_string()));

    let rows = items
        .iter()
        .map(|item| {
            let mut row = item.row.clone();
            row.push(item.cleaned_text.clone());
            row.push(item.scores.compound.to_string());
            row.push(item.scores.positive.to_string());
            row.push(item.scores.negative.to_string());
            row.push(item.scores.neutral.to_string());
            row.push(item.scores.polarity.to_string());
            row.push(item.scores.subjectivity.to_string());
            row.push(item.scores.category.as_str().to_string());
            row
        })
        .collect();

    Table::new(headers, rows)
}

fn excerpt(text: &str) -> String {
    text.chars().take(50).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn positive_text_scores_positive() {
        let analyzer = Analyzer::new();
        let scores = analyzer.score("great progress on renewable energy").unwrap();
        assert!(scores.compound >= 0.05);
        assert_eq!(scores.category, SentimentCategory::Positive);
        assert!(!scores.fallback);
    }

    #[test]
    fn negative_text_scores_negative() {
        let analyzer = Analyzer::new();
        let scores = analyzer.score("deeply worried about this disaster").unwrap();
        assert!(scores.compound <= -0.05);
        assert_eq!(scores.category, SentimentCategory::Negative);
    }

    #[test]
    fn empty_text_is_fully_neutral() {
        let analyzer = Analyzer::new();
        let scores = analyzer.score("").unwrap();
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neutral, 1.0);
        assert_eq!(scores.category, SentimentCategory::Neutral);
    }

    #[test]
    fn fractions_sum_to_one() {
        let analyzer = Analyzer::new();
        let samples = [
            "great progress on solar adoption",
            "concerned about rising pollution",
            "the meeting is on tuesday",
            "love this but worried about the risks",
            "",
            "word",
        ];
        for text in samples {
            let s = analyzer.score(text).unwrap();
            let sum = s.positive + s.negative + s.neutral;
            assert!(
                (sum - 1.0).abs() < 1e-6,
                "fractions sum {sum} for {text:?}"
            );
        }
    }

    #[test]
    fn negation_flips_sign() {
        let analyzer = Analyzer::new();
        let plain = analyzer.score("this is good").unwrap();
        let negated = analyzer.score("this is not good").unwrap();
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn booster_amplifies() {
        let analyzer = Analyzer::new();
        let plain = analyzer.score("good").unwrap();
        let boosted = analyzer.score("extremely good").unwrap();
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn pattern_model_populates_polarity_and_subjectivity() {
        let analyzer = Analyzer::new();
        let scores = analyzer.score("fantastic").unwrap();
        assert!(scores.polarity > 0.0);
        assert!(scores.subjectivity > 0.0);
        // The category is driven by the compound model alone.
        assert_eq!(
            scores.category,
            SentimentCategory::from_compound(scores.compound)
        );
    }

    #[test]
    fn resolves_text_before_body() {
        let t = table(&["body", "text"], &[&["from body", "from text"]]);
        assert_eq!(resolve_text_column(&t).unwrap(), 1);
    }

    #[test]
    fn process_preserves_order_and_length() {
        let t = table(
            &["id", "body"],
            &[
                &["1", "great progress on solar"],
                &["2", "neutral words only"],
                &["3", "worried about the damage"],
            ],
        );
        let analyzer = Analyzer::new();
        let scored = process(&t, &analyzer).unwrap();
        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].row[0], "1");
        assert_eq!(scored[2].row[0], "3");
        assert_eq!(scored[0].scores.category, SentimentCategory::Positive);
        assert_eq!(scored[2].scores.category, SentimentCategory::Negative);
    }

    #[test]
    fn missing_text_column_is_a_schema_error() {
        let t = table(&["id", "title"], &[&["1", "no text here"]]);
        let err = process(&t, &Analyzer::new()).unwrap_err();
        assert!(matches!(err, MoodwireError::Schema { .. }));
    }

    /// Fails on the nth call, succeeds otherwise.
    struct FlakyModel {
        calls: Cell<usize>,
        fail_on: usize,
        inner: Analyzer,
    }

    impl SentimentModel for FlakyModel {
        fn score(&self, text: &str) -> Result<SentimentScores> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call == self.fail_on {
                bail!("induced scoring fault");
            }
            self.inner.score(text)
        }
    }

    #[test]
    fn single_item_fault_does_not_abort_the_batch() {
        let t = table(
            &["id", "body"],
            &[
                &["1", "love this"],
                &["2", "great work"],
                &["3", "anything"],
                &["4", "terrible news"],
                &["5", "plain words"],
            ],
        );
        let model = FlakyModel {
            calls: Cell::new(0),
            fail_on: 3,
            inner: Analyzer::new(),
        };

        let scored = process(&t, &model).unwrap();
        assert_eq!(scored.len(), 5);
        assert_eq!(scored[2].scores, SentimentScores::neutral_fallback());
        assert!(scored[2].scores.fallback);
        for i in [0, 1, 3, 4] {
            assert!(!scored[i].scores.fallback, "item {i} should be unaffected");
        }
        assert_eq!(scored[0].scores.category, SentimentCategory::Positive);
        assert_eq!(scored[3].scores.category, SentimentCategory::Negative);
    }

    #[test]
    fn scored_table_appends_sentiment_columns() {
        let t = table(&["id", "body"], &[&["1", "great stuff"]]);
        let scored = process(&t, &Analyzer::new()).unwrap();
        let out = scored_table(&t, &scored);

        assert_eq!(out.headers.len(), 2 + SENTIMENT_HEADERS.len());
        assert_eq!(out.headers[2], "cleaned_text");
        assert_eq!(out.headers.last().unwrap(), "sentiment_category");
        let row = &out.rows[0];
        assert_eq!(out.value(row, "cleaned_text"), Some("great stuff"));
        assert_eq!(out.value(row, "sentiment_category"), Some("positive"));
        let compound: f64 = out.value(row, "vader_compound").unwrap().parse().unwrap();
        assert!(compound >= 0.05);
    }
}
