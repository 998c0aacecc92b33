//! End-to-end artifact flow with the live source down: extract falls back
//! to synthetic data, score produces a complete processed artifact.

use anyhow::Result;
use async_trait::async_trait;
use moodwire_common::RawItem;
use moodwire_pipeline::artifact::Table;
use moodwire_pipeline::sentiment::{Analyzer, SENTIMENT_HEADERS};
use moodwire_pipeline::source::synthetic::SYNTHETIC_ID_PREFIX;
use moodwire_pipeline::source::{LiveSource, SourceAdapter};
use moodwire_pipeline::stages;

struct DownSource;

#[async_trait]
impl LiveSource for DownSource {
    async fn fetch(&self, _query: &str, _limit: usize) -> Result<Vec<RawItem>> {
        anyhow::bail!("network unreachable")
    }
    fn name(&self) -> &str {
        "down"
    }
}

#[tokio::test]
async fn extract_then_score_produces_a_complete_processed_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = SourceAdapter::new(Box::new(DownSource));
    let subjects = vec!["climate change".to_string(), "sustainability".to_string()];

    let raw_path = stages::extract(&adapter, &subjects, 10, dir.path())
        .await
        .unwrap();
    assert!(raw_path.starts_with(dir.path().join("raw")));

    let analyzer = Analyzer::new();
    let scored_path = stages::score(&raw_path, &analyzer).unwrap();
    assert!(scored_path.starts_with(dir.path().join("processed")));

    let table = Table::read(&scored_path).unwrap();
    // Two subjects, ten synthetic items each.
    assert_eq!(table.len(), 20);
    for header in SENTIMENT_HEADERS {
        assert!(
            table.column_index(header).is_some(),
            "missing column {header}"
        );
    }

    for row in &table.rows {
        let id = table.value(row, "id").unwrap();
        assert!(id.starts_with(SYNTHETIC_ID_PREFIX));

        let positive: f64 = table.value(row, "vader_positive").unwrap().parse().unwrap();
        let negative: f64 = table.value(row, "vader_negative").unwrap().parse().unwrap();
        let neutral: f64 = table.value(row, "vader_neutral").unwrap().parse().unwrap();
        assert!((positive + negative + neutral - 1.0).abs() < 1e-6);

        let category = table.value(row, "sentiment_category").unwrap();
        assert!(
            ["positive", "negative", "neutral"].contains(&category),
            "unexpected category {category}"
        );

        let compound: f64 = table.value(row, "vader_compound").unwrap().parse().unwrap();
        assert!((-1.0..=1.0).contains(&compound));
    }
}

#[tokio::test]
async fn scoring_a_batch_without_text_columns_fails_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("raw").join("items_bad.csv");
    Table::new(
        vec!["id".to_string(), "title".to_string()],
        vec![vec!["1".to_string(), "not free text".to_string()]],
    )
    .write(&raw_path)
    .unwrap();

    let analyzer = Analyzer::new();
    let err = stages::score(&raw_path, &analyzer).unwrap_err();
    assert!(matches!(
        err,
        moodwire_common::MoodwireError::Schema { .. }
    ));
    assert!(!dir.path().join("processed").join("items_bad.csv").exists());
}
