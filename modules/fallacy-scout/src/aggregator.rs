//! One aggregation run: fetch every source, classify, merge into the corpus.
//!
//! Sources are fetched concurrently, each in its own task under a timeout, so
//! an error, a hang or a panic in one source only costs that source's items.
//! The run waits for every source to settle before merging.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tracing::info;

use fallacy_common::{Config, Example, RawItem};

use crate::classifier::classify;
use crate::corpus::Corpus;
use crate::events::{EventSink, RunEvent, TracingSink};
use crate::sources::{SourceAdapter, SourceError};
use crate::stats::RunStats;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_ITEMS_PER_SOURCE: usize = 5;

pub struct Aggregator {
    sources: Vec<Arc<dyn SourceAdapter>>,
    corpus: Arc<Corpus>,
    sink: Arc<dyn EventSink>,
    fetch_timeout: Duration,
    items_per_source: usize,
}

impl Aggregator {
    pub fn new(sources: Vec<Arc<dyn SourceAdapter>>, corpus: Arc<Corpus>) -> Self {
        Self {
            sources,
            corpus,
            sink: Arc::new(TracingSink),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            items_per_source: DEFAULT_ITEMS_PER_SOURCE,
        }
    }

    pub fn from_config(
        config: &Config,
        sources: Vec<Arc<dyn SourceAdapter>>,
        corpus: Arc<Corpus>,
    ) -> Self {
        Self::new(sources, corpus)
            .with_fetch_timeout(config.fetch_timeout)
            .with_items_per_source(config.items_per_source)
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_items_per_source(mut self, limit: usize) -> Self {
        self.items_per_source = limit;
        self
    }

    /// Run the pipeline once. Never fails: source failures are reported to
    /// the sink and contribute nothing; if nothing was fetched the corpus is
    /// left untouched.
    pub async fn run(&self) -> RunStats {
        info!(sources = self.sources.len(), "Updating fallacy examples...");

        let results = join_all(
            self.sources
                .iter()
                .map(|source| self.fetch_source(Arc::clone(source))),
        )
        .await;

        let mut stats = RunStats {
            sources_attempted: self.sources.len() as u32,
            ..Default::default()
        };
        let mut batch = Vec::new();

        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(items) => {
                    stats.items_fetched += items.len() as u32;
                    for item in items {
                        let fallacy_type = classify(&item.text);
                        stats.record(fallacy_type);
                        batch.push(Example::classified(item, fallacy_type));
                    }
                }
                Err(e) => {
                    stats.sources_failed += 1;
                    self.sink.emit(RunEvent::SourceFailed {
                        source: source.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if batch.is_empty() {
            stats.corpus_size = self.corpus.size();
            self.sink.emit(RunEvent::RunNoop {
                stats: stats.clone(),
            });
            return stats;
        }

        stats.corpus_size = self.corpus.merge(batch, Utc::now());
        self.sink.emit(RunEvent::RunCompleted {
            stats: stats.clone(),
        });
        stats
    }

    async fn fetch_source(&self, source: Arc<dyn SourceAdapter>) -> Result<Vec<RawItem>, SourceError> {
        let timeout = self.fetch_timeout;
        let task = tokio::spawn(async move { tokio::time::timeout(timeout, source.fetch()).await });

        match task.await {
            Ok(Ok(Ok(mut items))) => {
                items.truncate(self.items_per_source);
                Ok(items)
            }
            Ok(Ok(Err(e))) => Err(e),
            Ok(Err(_elapsed)) => Err(SourceError::Timeout(timeout)),
            Err(join_err) => Err(SourceError::Panicked(join_err.to_string())),
        }
    }
}
