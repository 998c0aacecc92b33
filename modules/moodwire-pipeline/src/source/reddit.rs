//! Reddit subreddit comment source, via the public JSON listing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use moodwire_common::RawItem;
use serde::Deserialize;

use super::LiveSource;

/// The listing endpoint caps `limit` at 100 per request.
const MAX_LIMIT_PER_REQUEST: usize = 100;

pub struct RedditSource {
    client: reqwest::Client,
    user_agent: String,
}

impl RedditSource {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            user_agent: user_agent.into(),
        }
    }
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    data: Comment,
}

#[derive(Deserialize)]
struct Comment {
    id: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    score: i64,
}

impl Comment {
    fn into_raw_item(self, subreddit: &str) -> RawItem {
        RawItem {
            id: self.id,
            created_utc: self.created_utc as i64,
            body: self.body,
            author: self.author,
            // Reddit does not expose a profile location on comments.
            author_location: String::new(),
            engagement_primary: self.score,
            engagement_secondary: 0,
            tags: Vec::new(),
            source_query: subreddit.to_string(),
        }
    }
}

#[async_trait]
impl LiveSource for RedditSource {
    /// `query` is a subreddit name; returns its most recent comments.
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawItem>> {
        let url = format!("https://www.reddit.com/r/{query}/comments.json");
        let limit = limit.min(MAX_LIMIT_PER_REQUEST);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .context("comment listing request failed")?
            .error_for_status()
            .context("comment listing returned an error status")?;

        let listing: Listing = response
            .json()
            .await
            .context("malformed comment listing payload")?;

        Ok(listing
            .data
            .children
            .into_iter()
            .map(|c| c.data.into_raw_item(query))
            .collect())
    }

    fn name(&self) -> &str {
        "reddit"
    }
}
