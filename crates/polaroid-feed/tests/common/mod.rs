use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use polaroid_core::error::{Error, TransportError};
use polaroid_core::{Collection, PhotoRecord, RecordStore, Result, StoreUrl};
use polaroid_feed::{FeedObserver, FetchFailed, LoadMode};

/// One scripted store response.
#[derive(Clone)]
pub enum Step {
    Rows(Vec<PhotoRecord>),
    Fail(&'static str),
    Delayed(Duration, Box<Step>),
}

/// A store that replays scripted responses in call order, then keeps
/// answering with the last one.
pub struct ScriptedStore {
    url: StoreUrl,
    steps: Mutex<VecDeque<Step>>,
    last: Mutex<Step>,
    calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            url: StoreUrl::new("https://store.test").unwrap(),
            steps: Mutex::new(steps.into_iter().collect()),
            last: Mutex::new(Step::Rows(Vec::new())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> Step {
        let mut steps = self.steps.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(step) = steps.pop_front() {
            *last = step;
        }
        last.clone()
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    fn url(&self) -> &StoreUrl {
        &self.url
    }

    async fn list_records(
        &self,
        _collection: &Collection,
        _limit: Option<u32>,
    ) -> Result<Vec<PhotoRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut step = self.next_step();
        loop {
            match step {
                Step::Rows(rows) => return Ok(rows),
                Step::Fail(message) => {
                    return Err(Error::Transport(TransportError::Connection {
                        message: message.to_string(),
                    }));
                }
                Step::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    step = *inner;
                }
            }
        }
    }
}

pub fn record(id: i64, created_at: &str) -> PhotoRecord {
    serde_json::from_value(json!({
        "id": id,
        "links": format!("/{}.png", id),
        "created_at": created_at,
    }))
    .unwrap()
}

pub fn ids(records: &[PhotoRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

/// Observer that keeps every event it sees.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl FeedObserver for RecordingObserver {
    fn load_started(&self, mode: LoadMode) {
        self.events.lock().unwrap().push(format!("start {:?}", mode));
    }

    fn load_succeeded(&self, mode: LoadMode, count: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("ok {:?} {}", mode, count));
    }

    fn load_failed(&self, mode: LoadMode, error: &FetchFailed) {
        self.events
            .lock()
            .unwrap()
            .push(format!("fail {:?} {}", mode, error));
    }
}
