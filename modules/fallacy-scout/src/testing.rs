// Test mocks for the aggregation pipeline.
//
// Source mocks matching the SourceAdapter boundary:
// - StaticSource: returns a fixed list of items
// - FailingSource: always returns a SourceError
// - PanickingSource: panics inside fetch
// - SlowSource: sleeps before returning, tracks concurrency
//
// Plus RecordingSink (EventSink) and helpers for building items.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use fallacy_common::RawItem;

use crate::events::{EventSink, RunEvent};
use crate::sources::{SourceAdapter, SourceError};

/// `n` items from `source`, with distinct texts and URLs.
pub fn items(source: &str, n: usize) -> Vec<RawItem> {
    (0..n)
        .map(|i| {
            RawItem::new(
                format!("{source} item {i}"),
                source,
                format!("https://{}.example.com/{i}", source.to_lowercase()),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// StaticSource
// ---------------------------------------------------------------------------

pub struct StaticSource {
    name: String,
    items: Vec<RawItem>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(name: &str, items: Vec<RawItem>) -> Self {
        Self {
            name: name.to_string(),
            items,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<RawItem>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.clone())
    }
}

// ---------------------------------------------------------------------------
// FailingSource / PanickingSource
// ---------------------------------------------------------------------------

pub struct FailingSource {
    name: String,
}

impl FailingSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl SourceAdapter for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<RawItem>, SourceError> {
        Err(SourceError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        })
    }
}

pub struct PanickingSource {
    name: String,
}

impl PanickingSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl SourceAdapter for PanickingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<RawItem>, SourceError> {
        panic!("{} blew up", self.name);
    }
}

// ---------------------------------------------------------------------------
// SlowSource
// ---------------------------------------------------------------------------

/// Sleeps for `delay` on every fetch, then returns one item.
/// Counts started/completed fetches and the peak number in flight.
pub struct SlowSource {
    name: String,
    delay: Duration,
    started: AtomicUsize,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowSource {
    pub fn new(name: &str, delay: Duration) -> Self {
        Self {
            name: name.to_string(),
            delay,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for SlowSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<RawItem>, SourceError> {
        let n = self.started.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(vec![RawItem::new(
            format!("{} slow item {n}", self.name),
            &self.name,
            format!("https://slow.example.com/{n}"),
        )])
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// Sink that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingSink {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.events.lock().expect("sink lock poisoned").clone()
    }

    /// Names of sources reported as failed, in report order.
    pub fn failed_sources(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                RunEvent::SourceFailed { source, .. } => Some(source),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: RunEvent) {
        self.events.lock().expect("sink lock poisoned").push(event);
    }
}
