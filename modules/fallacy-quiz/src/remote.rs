//! Client-side copy of the served corpus.
//!
//! Loaded from the API's examples endpoint and re-fetched once the refresh
//! interval has passed. Any failure, or an empty list, falls back to the
//! built-in examples so the quiz always has something to show.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use fallacy_common::{fallback_examples, Example};

const EXAMPLES_PATH: &str = "/api/fallacy-examples";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RemoteCorpus {
    client: reqwest::Client,
    examples_url: String,
    refresh_interval: Duration,
    examples: Vec<Example>,
    fetched_at: Option<Instant>,
}

impl RemoteCorpus {
    pub fn new(api_url: &str, refresh_interval: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            examples_url: format!("{}{EXAMPLES_PATH}", api_url.trim_end_matches('/')),
            refresh_interval,
            examples: Vec::new(),
            fetched_at: None,
        })
    }

    pub fn examples_url(&self) -> &str {
        &self.examples_url
    }

    /// True before the first load and once `refresh_interval` has elapsed.
    pub fn is_stale(&self) -> bool {
        match self.fetched_at {
            Some(at) => at.elapsed() >= self.refresh_interval,
            None => true,
        }
    }

    /// Current examples, re-fetching first if stale. Never empty.
    pub async fn examples(&mut self) -> &[Example] {
        if self.is_stale() {
            self.refresh().await;
        }
        &self.examples
    }

    pub async fn refresh(&mut self) {
        self.examples = match self.fetch().await {
            Ok(examples) if !examples.is_empty() => {
                info!(count = examples.len(), url = %self.examples_url, "Loaded examples");
                examples
            }
            Ok(_) => {
                warn!(url = %self.examples_url, "API returned no examples, using fallback set");
                fallback_examples()
            }
            Err(e) => {
                warn!(url = %self.examples_url, error = %e, "Failed to fetch examples, using fallback set");
                fallback_examples()
            }
        };
        self.fetched_at = Some(Instant::now());
    }

    async fn fetch(&self) -> Result<Vec<Example>, reqwest::Error> {
        self.client
            .get(&self.examples_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
