//! Feed configuration.

use std::time::Duration;

use polaroid_core::Collection;

/// How often a mounted feed refreshes itself.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// What a failed background refresh does to a view that is already showing
/// a successful fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackgroundFailurePolicy {
    /// Keep the last successful view and record the failure as
    /// [`FeedState::last_error`](crate::FeedState::last_error).
    #[default]
    RetainContent,

    /// Replace the view with the error phase, as a foreground failure would.
    ShowError,
}

/// Configuration for a [`GalleryFeed`](crate::GalleryFeed).
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// Collection to read records from.
    pub collection: Collection,

    /// Period of background refreshes while mounted.
    pub refresh_interval: Duration,

    /// Optional cap on the number of records fetched.
    pub limit: Option<u32>,

    /// Policy for background refresh failures.
    pub background_failure: BackgroundFailurePolicy,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            collection: Collection::default(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            limit: None,
            background_failure: BackgroundFailurePolicy::default(),
        }
    }
}

impl FeedConfig {
    /// Read from a different collection.
    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collection = collection;
        self
    }

    /// Refresh on a different period.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Cap the number of records fetched.
    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Use a different background failure policy.
    pub fn with_background_failure(mut self, policy: BackgroundFailurePolicy) -> Self {
        self.background_failure = policy;
        self
    }
}
