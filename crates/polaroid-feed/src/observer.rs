//! Observability hook for feed loads.

use tracing::{debug, info, warn};

use crate::error::FetchFailed;
use crate::state::LoadMode;

/// Receives load lifecycle events.
///
/// All methods default to doing nothing, so implementations override only
/// what they need.
pub trait FeedObserver: Send + Sync {
    fn load_started(&self, _mode: LoadMode) {}

    fn load_succeeded(&self, _mode: LoadMode, _count: usize) {}

    fn load_failed(&self, _mode: LoadMode, _error: &FetchFailed) {}
}

/// Emits structured `tracing` events. The default observer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl FeedObserver for TracingObserver {
    fn load_started(&self, mode: LoadMode) {
        debug!(?mode, "Fetching photos");
    }

    fn load_succeeded(&self, mode: LoadMode, count: usize) {
        info!(?mode, count, "Fetched photos");
    }

    fn load_failed(&self, mode: LoadMode, error: &FetchFailed) {
        warn!(?mode, error = %error, "Failed to fetch photos");
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl FeedObserver for NoopObserver {}
