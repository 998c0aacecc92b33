//! Stage entry points for the external DAG runner.
//!
//! Stages communicate only through artifact paths: extract returns the raw
//! batch path, score turns it into a processed path, load reads the
//! processed path and writes the destination table. The runner sequences
//! them and forwards each returned handle.

use std::path::{Path, PathBuf};

use anyhow::Result;
use moodwire_common::{LoadMode, MoodwireError, TableRef};
use sqlx::PgPool;
use tracing::info;

use crate::artifact::{self, Table};
use crate::loader::{self, LoadResult};
use crate::sentiment::{self, SentimentModel};
use crate::source::SourceAdapter;

/// Fetch one batch per subject, concatenate, and write the raw artifact.
pub async fn extract(
    adapter: &SourceAdapter,
    subjects: &[String],
    limit: usize,
    data_dir: &Path,
) -> Result<PathBuf> {
    let mut items = Vec::new();
    for subject in subjects {
        info!(subject = subject.as_str(), limit, "Extracting batch");
        items.extend(adapter.fetch(subject, limit).await);
    }

    let path = artifact::raw_artifact_path(data_dir);
    artifact::raw_batch_table(&items).write(&path)?;
    info!(
        count = items.len(),
        path = %path.display(),
        "Raw batch written"
    );
    Ok(path)
}

/// Score a raw artifact into its processed counterpart.
pub fn score(raw_path: &Path, model: &dyn SentimentModel) -> Result<PathBuf, MoodwireError> {
    let table = Table::read(raw_path)?;
    let scored = sentiment::process(&table, model)?;
    let out = sentiment::scored_table(&table, &scored);

    let path = artifact::processed_path_for(raw_path);
    out.write(&path)?;

    let fallbacks = scored.iter().filter(|s| s.scores.fallback).count();
    info!(
        count = scored.len(),
        fallbacks,
        path = %path.display(),
        "Scored batch written"
    );
    Ok(path)
}

/// Load a processed artifact into the destination table.
pub async fn load(
    pool: &PgPool,
    scored_path: &Path,
    dest: &TableRef,
    mode: LoadMode,
) -> Result<LoadResult> {
    let table = Table::read(scored_path)?;
    loader::load(pool, &table, dest, mode).await
}
