//! Run events and the sink that receives them.

use tracing::{info, warn};

use crate::stats::RunStats;

/// Structured events emitted by the aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// One source failed this run and contributed nothing.
    SourceFailed { source: String, error: String },
    /// New examples were merged into the corpus.
    RunCompleted { stats: RunStats },
    /// No source produced anything; the corpus was left as is.
    RunNoop { stats: RunStats },
}

/// Pluggable observability sink for run events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

/// Default sink: writes events to the tracing subscriber.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: RunEvent) {
        match event {
            RunEvent::SourceFailed { source, error } => {
                warn!(source = source.as_str(), error = error.as_str(), "Source fetch failed");
            }
            RunEvent::RunCompleted { stats } => {
                info!(
                    added = stats.examples_added,
                    failed_sources = stats.sources_failed,
                    corpus_size = stats.corpus_size,
                    "Updated with {} new examples",
                    stats.examples_added
                );
            }
            RunEvent::RunNoop { stats } => {
                info!(
                    sources = stats.sources_attempted,
                    failed_sources = stats.sources_failed,
                    "No new examples found"
                );
            }
        }
    }
}
