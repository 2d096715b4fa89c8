pub mod aggregator;
pub mod classifier;
pub mod corpus;
pub mod events;
pub mod scheduler;
pub mod sources;
pub mod stats;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use aggregator::Aggregator;
pub use classifier::classify;
pub use corpus::{Corpus, CorpusSnapshot};
pub use events::{EventSink, RunEvent, TracingSink};
pub use scheduler::{Scheduler, SchedulerHandle};
pub use sources::{build_sources, SourceAdapter, SourceError};
pub use stats::RunStats;
