// Twitter/X source: recent-search API v2. Needs a bearer token; without one
// the source is disabled and always yields nothing.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use fallacy_common::RawItem;

use super::{read_success_body, SourceAdapter, SourceError};

const SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";

/// The recent-search endpoint rejects `max_results` outside 10..=100.
const API_MIN_RESULTS: usize = 10;
const API_MAX_RESULTS: usize = 100;

pub struct TwitterSource {
    client: reqwest::Client,
    bearer_token: Option<String>,
    query: String,
    limit: usize,
}

impl TwitterSource {
    pub fn new(
        client: reqwest::Client,
        bearer_token: Option<String>,
        query: &str,
        limit: usize,
    ) -> Self {
        Self {
            client,
            bearer_token,
            query: query.to_string(),
            limit,
        }
    }
}

#[async_trait]
impl SourceAdapter for TwitterSource {
    fn name(&self) -> &str {
        "Twitter Political Discussions"
    }

    async fn fetch(&self) -> Result<Vec<RawItem>, SourceError> {
        let Some(token) = self.bearer_token.as_deref() else {
            debug!("twitter: no bearer token configured, skipping");
            return Ok(Vec::new());
        };

        info!(query = self.query.as_str(), limit = self.limit, "twitter: searching recent tweets");

        let max_results = self.limit.clamp(API_MIN_RESULTS, API_MAX_RESULTS);
        let resp = self
            .client
            .get(SEARCH_URL)
            .bearer_auth(token)
            .query(&[
                ("query", self.query.clone()),
                ("max_results", max_results.to_string()),
            ])
            .send()
            .await?;
        let body = read_success_body(resp).await?;

        parse_search(&body, self.limit)
    }
}

pub fn parse_search(body: &str, limit: usize) -> Result<Vec<RawItem>, SourceError> {
    let search: SearchResponse = serde_json::from_str(body)?;

    // No matches comes back without a `data` field at all.
    let items = search
        .data
        .unwrap_or_default()
        .into_iter()
        .filter(|tweet| !tweet.text.trim().is_empty())
        .take(limit)
        .map(|tweet| RawItem {
            url: format!("https://twitter.com/i/web/status/{}", tweet.id),
            text: tweet.text,
            source: "Twitter: recent discussion".to_string(),
        })
        .collect();

    Ok(items)
}

#[derive(Deserialize)]
struct SearchResponse {
    data: Option<Vec<Tweet>>,
}

#[derive(Deserialize)]
struct Tweet {
    id: String,
    text: String,
}
