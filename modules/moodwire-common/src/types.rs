use serde::{Deserialize, Serialize};

/// One unscored text record, fetched live or synthesized.
///
/// `id` is unique within a batch only — synthetic ids are batch-local and
/// carry a `synthetic_` prefix so downstream consumers can tell them apart
/// from live data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub id: String,
    /// Creation time as epoch seconds.
    pub created_utc: i64,
    /// The free text to score.
    pub body: String,
    pub author: String,
    pub author_location: String,
    /// Primary engagement counter (likes / upvotes).
    pub engagement_primary: i64,
    /// Secondary engagement counter (shares / replies).
    pub engagement_secondary: i64,
    pub tags: Vec<String>,
    /// The query or subject this item was fetched for.
    pub source_query: String,
}

/// Categorical sentiment label derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

/// Dead zone absorbing near-zero compound scores into `neutral`.
const CATEGORY_THRESHOLD: f64 = 0.05;

impl SentimentCategory {
    /// Map a compound score onto a category.
    ///
    /// `>= 0.05` is positive, `<= -0.05` is negative, the open interval
    /// between is neutral. The thresholds are load-bearing for downstream
    /// consumers and must not drift.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= CATEGORY_THRESHOLD {
            SentimentCategory::Positive
        } else if compound <= -CATEGORY_THRESHOLD {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "positive",
            SentimentCategory::Negative => "negative",
            SentimentCategory::Neutral => "neutral",
        }
    }
}

/// Output of both sentiment models for one text.
///
/// The compound score and its three fractions come from the lexicon model
/// and drive categorization. Polarity and subjectivity come from the
/// pattern model and are carried through for downstream analytics only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    /// Normalized sentiment intensity in [-1, 1].
    pub compound: f64,
    /// Positive token mass fraction in [0, 1].
    pub positive: f64,
    /// Negative token mass fraction in [0, 1].
    pub negative: f64,
    /// Neutral token mass fraction in [0, 1].
    pub neutral: f64,
    /// Pattern-model polarity in [-1, 1].
    pub polarity: f64,
    /// Pattern-model subjectivity in [0, 1].
    pub subjectivity: f64,
    pub category: SentimentCategory,
    /// True when this record is the fixed neutral substitute for a scoring
    /// failure. Logged for observability, never persisted.
    pub fallback: bool,
}

impl SentimentScores {
    /// The fixed substitute used when scoring a single item fails.
    /// A bad record must never abort its batch.
    pub fn neutral_fallback() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            polarity: 0.0,
            subjectivity: 0.0,
            category: SentimentCategory::Neutral,
            fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_boundaries_are_exact() {
        assert_eq!(
            SentimentCategory::from_compound(0.05),
            SentimentCategory::Positive
        );
        assert_eq!(
            SentimentCategory::from_compound(-0.05),
            SentimentCategory::Negative
        );
        assert_eq!(
            SentimentCategory::from_compound(0.0),
            SentimentCategory::Neutral
        );
    }

    #[test]
    fn dead_zone_is_neutral() {
        assert_eq!(
            SentimentCategory::from_compound(0.049),
            SentimentCategory::Neutral
        );
        assert_eq!(
            SentimentCategory::from_compound(-0.049),
            SentimentCategory::Neutral
        );
    }

    #[test]
    fn neutral_fallback_is_fully_neutral() {
        let scores = SentimentScores::neutral_fallback();
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neutral, 1.0);
        assert_eq!(scores.category, SentimentCategory::Neutral);
        assert!(scores.fallback);
    }
}
