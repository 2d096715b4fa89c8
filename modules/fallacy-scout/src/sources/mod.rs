//! External discussion sources.
//!
//! Each adapter turns one upstream into `RawItem`s. Adapters report failures
//! as `SourceError`; the aggregator is what turns a failure into an empty
//! contribution, so nothing past it ever sees an adapter error.

pub mod news;
pub mod reddit;
pub mod twitter;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use fallacy_common::{Config, RawItem, SourceKind};

pub use news::NewsFeedSource;
pub use reddit::RedditSource;
pub use twitter::TwitterSource;

pub const USER_AGENT: &str = "fallacy-trainer/0.1";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Source task panicked: {0}")]
    Panicked(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// One external source of discussion snippets.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Human-readable name used in logs and failure events.
    fn name(&self) -> &str;

    /// Fetch the current batch. A source that cannot run (e.g. missing
    /// credentials) returns `Ok(vec![])`, which is not a failure.
    async fn fetch(&self) -> Result<Vec<RawItem>, SourceError>;
}

/// Shared HTTP client for all adapters.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(SourceError::from)
}

/// Construct the enabled adapters in configuration order.
pub fn build_sources(config: &Config) -> Result<Vec<Arc<dyn SourceAdapter>>, SourceError> {
    let client = http_client(config.fetch_timeout)?;
    let limit = config.items_per_source;

    let sources = config
        .enabled_sources
        .iter()
        .map(|kind| -> Arc<dyn SourceAdapter> {
            match kind {
                SourceKind::Reddit => Arc::new(RedditSource::new(
                    client.clone(),
                    &config.reddit_subreddit,
                    limit,
                )),
                SourceKind::Twitter => Arc::new(TwitterSource::new(
                    client.clone(),
                    config.twitter_bearer_token.clone(),
                    &config.twitter_query,
                    limit,
                )),
                SourceKind::News => Arc::new(NewsFeedSource::new(
                    client.clone(),
                    config.news_feed_urls.clone(),
                    limit,
                )),
            }
        })
        .collect();

    Ok(sources)
}

/// Pass 2xx responses through; anything else becomes an `Api` error
/// carrying the response body.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(SourceError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}

/// Return the response body, or an `Api` error for non-2xx statuses.
pub(crate) async fn read_success_body(resp: reqwest::Response) -> Result<String, SourceError> {
    Ok(check_status(resp).await?.text().await?)
}
