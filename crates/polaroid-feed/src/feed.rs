//! The gallery feed and its mounted, self-refreshing form.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, instrument, warn};

use polaroid_core::RecordStore;

use crate::config::FeedConfig;
use crate::error::FetchFailed;
use crate::observer::{FeedObserver, TracingObserver};
use crate::state::{FeedState, LoadMode};
use crate::view::UserAction;

/// Shortest refresh period a mounted feed will arm.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// A photo feed over a record store.
///
/// An unmounted feed only loads when asked. [`mount`](Self::mount) turns it
/// into a [`MountedFeed`], which loads immediately and then refreshes on
/// [`FeedConfig::refresh_interval`] until unmounted.
pub struct GalleryFeed<S> {
    inner: Arc<FeedInner<S>>,
}

struct FeedInner<S> {
    store: S,
    config: FeedConfig,
    observer: Arc<dyn FeedObserver>,
    state: watch::Sender<FeedState>,
}

impl<S> GalleryFeed<S>
where
    S: RecordStore + 'static,
{
    /// Create a feed that reports through [`TracingObserver`].
    pub fn new(store: S, config: FeedConfig) -> Self {
        Self::with_observer(store, config, Arc::new(TracingObserver))
    }

    /// Create a feed with a custom observer.
    pub fn with_observer(store: S, config: FeedConfig, observer: Arc<dyn FeedObserver>) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self {
            inner: Arc::new(FeedInner {
                store,
                config,
                observer,
                state,
            }),
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.inner.config
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.inner.state.subscribe()
    }

    /// Read the collection once and apply the outcome to the state.
    ///
    /// Returns the number of records on success. Concurrent loads are not
    /// serialized; whichever completes last determines the state.
    pub async fn load(&self, mode: LoadMode) -> Result<usize, FetchFailed> {
        self.inner.load(mode).await
    }

    /// Start refreshing.
    ///
    /// Runs a foreground load right away and a background load every
    /// refresh interval after that. Must be called within a Tokio runtime.
    pub fn mount(self) -> MountedFeed<S> {
        let period = self.inner.config.refresh_interval.max(MIN_REFRESH_INTERVAL);
        let task = tokio::spawn(refresh_loop(self.inner.clone(), period));
        debug!(?period, "Mounted gallery feed");

        MountedFeed {
            inner: self.inner,
            task,
        }
    }
}

impl<S> FeedInner<S>
where
    S: RecordStore,
{
    #[instrument(skip(self), fields(collection = %self.config.collection))]
    async fn load(&self, mode: LoadMode) -> Result<usize, FetchFailed> {
        self.observer.load_started(mode);
        if mode == LoadMode::Foreground {
            self.state.send_modify(|state| state.begin(mode));
        }

        match self
            .store
            .list_records(&self.config.collection, self.config.limit)
            .await
        {
            Ok(records) => {
                let count = records.len();
                self.state.send_modify(|state| state.succeed(records));
                self.observer.load_succeeded(mode, count);
                Ok(count)
            }
            Err(e) => {
                let error = FetchFailed::from(e);
                let policy = self.config.background_failure;
                self.state
                    .send_modify(|state| state.fail(mode, error.clone(), policy));
                self.observer.load_failed(mode, &error);
                Err(error)
            }
        }
    }
}

/// Owns the refresh timer and every load it starts. Dropping this future
/// drops the `JoinSet`, which aborts loads still in flight.
async fn refresh_loop<S>(inner: Arc<FeedInner<S>>, period: Duration)
where
    S: RecordStore + 'static,
{
    let mut loads = JoinSet::new();
    spawn_load(&mut loads, &inner, LoadMode::Foreground);

    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                spawn_load(&mut loads, &inner, LoadMode::Background);
            }
            Some(joined) = loads.join_next(), if !loads.is_empty() => {
                if let Err(e) = joined {
                    warn!(error = %e, "Load task ended abnormally");
                }
            }
        }
    }
}

fn spawn_load<S>(loads: &mut JoinSet<()>, inner: &Arc<FeedInner<S>>, mode: LoadMode)
where
    S: RecordStore + 'static,
{
    let inner = inner.clone();
    loads.spawn(async move {
        // Outcome already lives in the state and the observer.
        let _ = inner.load(mode).await;
    });
}

/// A feed that is refreshing itself.
///
/// The refresh timer belongs to this handle alone. It is cancelled by
/// [`unmount`](Self::unmount) or when the handle is dropped, and loads the
/// timer started that have not finished yet are discarded with it.
pub struct MountedFeed<S> {
    inner: Arc<FeedInner<S>>,
    task: JoinHandle<()>,
}

impl<S> MountedFeed<S>
where
    S: RecordStore + 'static,
{
    /// Returns a snapshot of the current state.
    pub fn state(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.inner.state.subscribe()
    }

    /// Run the load behind a view's action button.
    pub async fn perform(&self, action: UserAction) -> Result<usize, FetchFailed> {
        self.inner.load(action.load_mode()).await
    }

    /// Retry after a failure, as the error view's button does.
    pub async fn retry(&self) -> Result<usize, FetchFailed> {
        self.perform(UserAction::Retry).await
    }

    /// Stop refreshing and hand back the feed, state intact.
    pub fn unmount(self) -> GalleryFeed<S> {
        self.task.abort();
        debug!("Unmounted gallery feed");
        GalleryFeed {
            inner: self.inner.clone(),
        }
    }
}

impl<S> Drop for MountedFeed<S> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<S> std::fmt::Debug for GalleryFeed<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryFeed")
            .field("config", &self.inner.config)
            .field("phase", self.inner.state.borrow().phase())
            .finish()
    }
}

impl<S> std::fmt::Debug for MountedFeed<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedFeed")
            .field("config", &self.inner.config)
            .field("phase", self.inner.state.borrow().phase())
            .field("finished", &self.task.is_finished())
            .finish()
    }
}
