//! Twitter API v2 recent-search source.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moodwire_common::RawItem;
use serde::Deserialize;

use super::LiveSource;

const SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";

/// The API rejects `max_results` above 100.
const MAX_RESULTS_PER_REQUEST: usize = 100;

pub struct TwitterSource {
    client: reqwest::Client,
    bearer_token: Option<String>,
}

impl TwitterSource {
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            bearer_token,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    data: Option<Vec<Tweet>>,
}

#[derive(Deserialize)]
struct Tweet {
    id: String,
    text: String,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    public_metrics: Metrics,
    entities: Option<Entities>,
}

#[derive(Deserialize, Default)]
struct Metrics {
    #[serde(default)]
    retweet_count: i64,
    #[serde(default)]
    like_count: i64,
}

#[derive(Deserialize)]
struct Entities {
    hashtags: Option<Vec<Hashtag>>,
}

#[derive(Deserialize)]
struct Hashtag {
    tag: String,
}

impl Tweet {
    fn into_raw_item(self, query: &str) -> RawItem {
        let tags = self
            .entities
            .and_then(|e| e.hashtags)
            .map(|tags| tags.into_iter().map(|h| h.tag).collect())
            .unwrap_or_default();
        RawItem {
            id: self.id,
            created_utc: self
                .created_at
                .unwrap_or_else(Utc::now)
                .timestamp(),
            body: self.text,
            // Author expansion is not requested; the search payload alone
            // does not carry a screen name.
            author: "user".to_string(),
            author_location: String::new(),
            engagement_primary: self.public_metrics.like_count,
            engagement_secondary: self.public_metrics.retweet_count,
            tags,
            source_query: query.to_string(),
        }
    }
}

#[async_trait]
impl LiveSource for TwitterSource {
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawItem>> {
        let token = self
            .bearer_token
            .as_deref()
            .context("TWITTER_BEARER_TOKEN is not set")?;
        let max_results = limit.min(MAX_RESULTS_PER_REQUEST);

        let response = self
            .client
            .get(SEARCH_URL)
            .bearer_auth(token)
            .query(&[
                ("query", query),
                ("max_results", &max_results.to_string()),
                ("tweet.fields", "created_at,public_metrics,entities"),
            ])
            .send()
            .await
            .context("recent-search request failed")?
            .error_for_status()
            .context("recent-search returned an error status")?;

        let body: SearchResponse = response
            .json()
            .await
            .context("malformed recent-search payload")?;

        Ok(body
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.into_raw_item(query))
            .collect())
    }

    fn name(&self) -> &str {
        "twitter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_is_an_error() {
        let source = TwitterSource::new(None);
        let err = source.fetch("climate change", 10).await.unwrap_err();
        assert!(err.to_string().contains("TWITTER_BEARER_TOKEN"));
    }

    #[test]
    fn tweet_maps_onto_raw_item() {
        let tweet: Tweet = serde_json::from_value(serde_json::json!({
            "id": "1790000000000000000",
            "text": "Solar adoption keeps climbing #CleanEnergy",
            "created_at": "2025-05-03T12:34:56Z",
            "public_metrics": {"retweet_count": 7, "like_count": 42},
            "entities": {"hashtags": [{"tag": "CleanEnergy"}]}
        }))
        .unwrap();

        let item = tweet.into_raw_item("renewable energy");
        assert_eq!(item.id, "1790000000000000000");
        assert_eq!(item.engagement_primary, 42);
        assert_eq!(item.engagement_secondary, 7);
        assert_eq!(item.tags, vec!["CleanEnergy".to_string()]);
        assert_eq!(item.source_query, "renewable energy");
        assert!(item.created_utc > 0);
    }

    #[test]
    fn sparse_tweet_still_maps() {
        let tweet: Tweet = serde_json::from_value(serde_json::json!({
            "id": "1",
            "text": "hello"
        }))
        .unwrap();
        let item = tweet.into_raw_item("q");
        assert_eq!(item.engagement_primary, 0);
        assert!(item.tags.is_empty());
    }
}
