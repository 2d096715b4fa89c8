//! Bounded, newest-first store of classified examples.
//!
//! Merges build a fresh sequence and swap it in whole, so a reader holding a
//! snapshot sees either the state before a merge or the state after it.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use fallacy_common::{fallback_examples, CorpusStatus, Example};

/// Default number of examples kept.
pub const DEFAULT_CAPACITY: usize = 50;

pub struct Corpus {
    capacity: usize,
    state: RwLock<CorpusSnapshot>,
}

/// Point-in-time view of the corpus.
#[derive(Debug, Clone)]
pub struct CorpusSnapshot {
    pub items: Arc<[Example]>,
    pub last_update: Option<DateTime<Utc>>,
}

impl Corpus {
    /// Corpus holding the fallback examples, stamped `now`.
    pub fn seeded(capacity: usize, now: DateTime<Utc>) -> Self {
        let mut items = fallback_examples();
        items.truncate(capacity.max(1));
        Self {
            capacity: capacity.max(1),
            state: RwLock::new(CorpusSnapshot {
                items: items.into(),
                last_update: Some(now),
            }),
        }
    }

    pub fn empty(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: RwLock::new(CorpusSnapshot {
                items: Arc::from(Vec::new()),
                last_update: None,
            }),
        }
    }

    pub fn snapshot(&self) -> CorpusSnapshot {
        self.state.read().expect("corpus lock poisoned").clone()
    }

    /// Number of examples currently held.
    pub fn size(&self) -> usize {
        self.state.read().expect("corpus lock poisoned").items.len()
    }

    /// Prepend `batch` (keeping its order), evict from the tail down to
    /// capacity, and stamp `now`. An empty batch changes nothing.
    /// Returns the resulting corpus size.
    pub fn merge(&self, batch: Vec<Example>, now: DateTime<Utc>) -> usize {
        let mut state = self.state.write().expect("corpus lock poisoned");
        if batch.is_empty() {
            return state.items.len();
        }

        let merged: Vec<Example> = batch
            .into_iter()
            .chain(state.items.iter().cloned())
            .take(self.capacity)
            .collect();

        state.items = merged.into();
        state.last_update = Some(now);
        state.items.len()
    }

    /// Status view; the next update is expected one `interval` after the last.
    pub fn status(&self, interval: Duration) -> CorpusStatus {
        let snapshot = self.snapshot();
        let next_update_time = snapshot.last_update.and_then(|last| {
            chrono::Duration::from_std(interval)
                .ok()
                .map(|step| last + step)
        });
        CorpusStatus {
            example_count: snapshot.items.len(),
            last_update_time: snapshot.last_update,
            next_update_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use fallacy_common::{FallacyCategory, RawItem};

    use super::*;

    fn example(n: usize) -> Example {
        Example::classified(
            RawItem::new(format!("item {n}"), "test", format!("https://example.com/{n}")),
            FallacyCategory::StrawMan,
        )
    }

    fn batch(range: std::ops::Range<usize>) -> Vec<Example> {
        range.map(example).collect()
    }

    #[test]
    fn seeded_corpus_holds_fallbacks() {
        let now = Utc::now();
        let corpus = Corpus::seeded(DEFAULT_CAPACITY, now);
        let snapshot = corpus.snapshot();

        assert_eq!(snapshot.items.len(), 5);
        assert_eq!(snapshot.last_update, Some(now));
    }

    #[test]
    fn empty_merge_leaves_items_and_timestamp() {
        let seeded_at = Utc::now();
        let corpus = Corpus::seeded(DEFAULT_CAPACITY, seeded_at);
        let before = corpus.snapshot();

        let size = corpus.merge(Vec::new(), seeded_at + chrono::Duration::hours(1));
        let after = corpus.snapshot();

        assert_eq!(size, 5);
        assert_eq!(after.items, before.items);
        assert_eq!(after.last_update, Some(seeded_at));
    }

    #[test]
    fn merge_prepends_in_batch_order() {
        let corpus = Corpus::seeded(DEFAULT_CAPACITY, Utc::now());
        let later = Utc::now() + chrono::Duration::hours(1);

        corpus.merge(batch(0..3), later);
        let snapshot = corpus.snapshot();

        assert_eq!(snapshot.items.len(), 8);
        assert_eq!(snapshot.items[0].text, "item 0");
        assert_eq!(snapshot.items[1].text, "item 1");
        assert_eq!(snapshot.items[2].text, "item 2");
        assert_eq!(snapshot.items[3].fallacy_type, FallacyCategory::AdHominem);
        assert_eq!(snapshot.last_update, Some(later));
    }

    #[test]
    fn capacity_evicts_oldest_from_tail() {
        let corpus = Corpus::empty(DEFAULT_CAPACITY);
        let now = Utc::now();

        corpus.merge(batch(0..30), now);
        corpus.merge(batch(100..130), now);
        let snapshot = corpus.snapshot();

        assert_eq!(snapshot.items.len(), 50);
        assert_eq!(snapshot.items[0].text, "item 100");
        assert_eq!(snapshot.items[29].text, "item 129");
        assert_eq!(snapshot.items[30].text, "item 0");
        assert_eq!(snapshot.items[49].text, "item 19");
    }

    #[test]
    fn oversized_batch_is_truncated_to_capacity() {
        let corpus = Corpus::empty(10);
        corpus.merge(batch(0..25), Utc::now());

        let snapshot = corpus.snapshot();
        assert_eq!(snapshot.items.len(), 10);
        assert_eq!(snapshot.items[9].text, "item 9");
    }

    #[test]
    fn repeated_merges_never_exceed_capacity() {
        let corpus = Corpus::seeded(DEFAULT_CAPACITY, Utc::now());
        for round in 0..40 {
            let size = corpus.merge(batch(round * 7..round * 7 + 7), Utc::now());
            assert!(size <= DEFAULT_CAPACITY);
        }
        let snapshot = corpus.snapshot();
        // newest batch leads
        assert_eq!(snapshot.items[0].text, format!("item {}", 39 * 7));
    }

    #[test]
    fn snapshot_is_unaffected_by_later_merges() {
        let corpus = Corpus::seeded(DEFAULT_CAPACITY, Utc::now());
        let held = corpus.snapshot();

        corpus.merge(batch(0..3), Utc::now());

        assert_eq!(held.items.len(), 5);
        assert_eq!(corpus.size(), 8);
    }

    #[test]
    fn status_projects_next_update() {
        let now = Utc::now();
        let corpus = Corpus::seeded(DEFAULT_CAPACITY, now);

        let status = corpus.status(Duration::from_secs(3600));

        assert_eq!(status.example_count, 5);
        assert_eq!(status.last_update_time, Some(now));
        assert_eq!(status.next_update_time, Some(now + chrono::Duration::hours(1)));
    }

    #[test]
    fn empty_corpus_has_no_update_times() {
        let status = Corpus::empty(5).status(Duration::from_secs(3600));
        assert_eq!(status.example_count, 0);
        assert!(status.last_update_time.is_none());
        assert!(status.next_update_time.is_none());
    }
}
