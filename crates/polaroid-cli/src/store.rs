//! Record store selection for CLI use.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tracing::debug;

use polaroid_core::{ApiKey, Collection, PhotoRecord, RecordStore, StoreUrl};
use polaroid_feed::FeedConfig;
use polaroid_file::FileStore;
use polaroid_rest::RestStore;

use crate::cli::StoreArgs;

/// Store wrapper for CLI use.
#[derive(Debug)]
pub enum CliStore {
    File(FileStore),
    Rest(RestStore),
}

impl CliStore {
    /// Open the store named by the arguments: `file://` URLs read a local
    /// directory, anything else is a hosted store and needs an API key.
    pub fn open(args: &StoreArgs) -> Result<Self> {
        let url = StoreUrl::new(&args.store_url).context("Invalid store URL")?;
        debug!(store = %url, "Opening record store");

        if url.is_local() {
            let store = FileStore::from_url(url).context("Invalid file store URL")?;
            return Ok(CliStore::File(store));
        }

        let Some(api_key) = args.api_key.as_deref() else {
            bail!("A hosted store needs an API key. Pass --api-key or set POLAROID_API_KEY.");
        };

        let store = RestStore::with_timeout(
            url,
            ApiKey::new(api_key),
            Duration::from_secs(args.timeout),
        )
        .context("Failed to create store client")?;

        Ok(CliStore::Rest(store))
    }
}

#[async_trait]
impl RecordStore for CliStore {
    fn url(&self) -> &StoreUrl {
        match self {
            CliStore::File(store) => store.url(),
            CliStore::Rest(store) => store.url(),
        }
    }

    async fn list_records(
        &self,
        collection: &Collection,
        limit: Option<u32>,
    ) -> polaroid_core::Result<Vec<PhotoRecord>> {
        match self {
            CliStore::File(store) => store.list_records(collection, limit).await,
            CliStore::Rest(store) => store.list_records(collection, limit).await,
        }
    }
}

/// Feed configuration shared by every command.
pub fn feed_config(args: &StoreArgs) -> Result<FeedConfig> {
    let collection = Collection::new(&args.collection).context("Invalid collection name")?;
    Ok(FeedConfig::default()
        .with_collection(collection)
        .with_limit(args.limit))
}
