//! Raw item acquisition: live sources with a synthetic fallback.
//!
//! The adapter never surfaces a retrieval failure. A dead API key, a
//! network error, or an empty result set all degrade to a synthetic batch
//! so a scheduled run always has something to score. Fidelity is traded
//! for availability on purpose.

pub mod reddit;
pub mod synthetic;
pub mod twitter;

use anyhow::Result;
use async_trait::async_trait;
use moodwire_common::RawItem;
use tracing::{info, warn};

pub use reddit::RedditSource;
pub use twitter::TwitterSource;

/// A live external source of raw items.
#[async_trait]
pub trait LiveSource: Send + Sync {
    /// Fetch up to `limit` items for a query or subject, capped at the
    /// source's own per-request maximum.
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawItem>>;
    fn name(&self) -> &str;
}

/// Where a batch actually came from. Callers that only want items can
/// flatten it; the tag exists so the origin is observable.
#[derive(Debug)]
pub enum FetchOutcome {
    Live(Vec<RawItem>),
    Synthetic(Vec<RawItem>),
}

impl FetchOutcome {
    pub fn into_items(self) -> Vec<RawItem> {
        match self {
            FetchOutcome::Live(items) | FetchOutcome::Synthetic(items) => items,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, FetchOutcome::Synthetic(_))
    }
}

/// Live source wrapped with the synthetic fallback policy.
pub struct SourceAdapter {
    live: Box<dyn LiveSource>,
}

impl SourceAdapter {
    pub fn new(live: Box<dyn LiveSource>) -> Self {
        Self { live }
    }

    /// Fetch items for a query. Never fails: any live-source problem is
    /// logged and answered with a synthetic batch of the same size.
    pub async fn fetch(&self, query: &str, limit: usize) -> Vec<RawItem> {
        self.fetch_tagged(query, limit).await.into_items()
    }

    /// Fetch with the live/synthetic origin preserved.
    pub async fn fetch_tagged(&self, query: &str, limit: usize) -> FetchOutcome {
        match self.live.fetch(query, limit).await {
            Ok(items) if !items.is_empty() => {
                info!(
                    source = self.live.name(),
                    query,
                    count = items.len(),
                    "Fetched live batch"
                );
                FetchOutcome::Live(items)
            }
            Ok(_) => {
                warn!(
                    source = self.live.name(),
                    query, "Live source returned no items, generating synthetic batch"
                );
                FetchOutcome::Synthetic(synthetic::generate(query, limit))
            }
            Err(e) => {
                warn!(
                    source = self.live.name(),
                    query,
                    error = %e,
                    "Live fetch failed, generating synthetic batch"
                );
                FetchOutcome::Synthetic(synthetic::generate(query, limit))
            }
        }
    }
}
