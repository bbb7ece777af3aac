//! PostgREST-backed record store implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use polaroid_core::traits::RecordStore;
use polaroid_core::{ApiKey, Collection, PhotoRecord, Result, StoreUrl};

use crate::client::{DEFAULT_TIMEOUT, RestClient};

/// Query string for a newest-first listing.
#[derive(Debug, serde::Serialize)]
struct ListQuery {
    select: &'static str,
    order: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

/// A hosted record store reached over PostgREST.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: RestClient,
}

impl RestStore {
    /// Create a store for the given project URL and API key.
    pub fn new(store: StoreUrl, api_key: ApiKey) -> Result<Self> {
        Self::with_timeout(store, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a store with an explicit per-request timeout.
    pub fn with_timeout(store: StoreUrl, api_key: ApiKey, timeout: Duration) -> Result<Self> {
        let client = RestClient::new(store, &api_key, timeout)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RecordStore for RestStore {
    fn url(&self) -> &StoreUrl {
        self.client.store()
    }

    #[instrument(skip(self), fields(%collection))]
    async fn list_records(
        &self,
        collection: &Collection,
        limit: Option<u32>,
    ) -> Result<Vec<PhotoRecord>> {
        let query = ListQuery {
            select: "*",
            order: "created_at.desc",
            limit,
        };

        let records: Vec<PhotoRecord> = self.client.select(collection, &query).await?;
        debug!(count = records.len(), "Listed records");
        Ok(records)
    }
}
