//! polaroid-feed - Polling photo gallery feed.
//!
//! A [`GalleryFeed`] owns the list of photo records read from a
//! [`RecordStore`](polaroid_core::RecordStore), tracks which view phase the
//! gallery is in, and once mounted refreshes itself on a fixed interval until
//! the [`MountedFeed`] handle is unmounted or dropped.
//!
//! # Example
//!
//! ```no_run
//! use polaroid_core::{ApiKey, StoreUrl};
//! use polaroid_feed::{FeedConfig, GalleryFeed};
//! use polaroid_rest::RestStore;
//!
//! # async fn run() -> polaroid_core::Result<()> {
//! let store = RestStore::new(StoreUrl::new("https://abc.supabase.co")?, ApiKey::new("anon"))?;
//! let mounted = GalleryFeed::new(store, FeedConfig::default()).mount();
//!
//! let mut changes = mounted.subscribe();
//! while changes.changed().await.is_ok() {
//!     println!("{:?}", changes.borrow().view());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod feed;
mod observer;
mod state;
mod view;

pub use config::{BackgroundFailurePolicy, DEFAULT_REFRESH_INTERVAL, FeedConfig};
pub use error::FetchFailed;
pub use feed::{GalleryFeed, MountedFeed};
pub use observer::{FeedObserver, NoopObserver, TracingObserver};
pub use state::{FeedState, LoadMode, Phase};
pub use view::{Card, GalleryView, LINK_REL, LINK_TARGET, UserAction};
