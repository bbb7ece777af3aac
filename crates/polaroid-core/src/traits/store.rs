//! Record store trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::record::PhotoRecord;
use crate::types::{Collection, StoreUrl};

/// A read-only source of photo records.
///
/// Stores never see writes from this crate; records are created and deleted
/// out of band.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns the URL this store reads from.
    fn url(&self) -> &StoreUrl;

    /// List records in a collection, newest first by `created_at`.
    ///
    /// With `limit`, only the newest `limit` records are returned.
    async fn list_records(
        &self,
        collection: &Collection,
        limit: Option<u32>,
    ) -> Result<Vec<PhotoRecord>>;
}

#[async_trait]
impl<T> RecordStore for Arc<T>
where
    T: RecordStore + ?Sized,
{
    fn url(&self) -> &StoreUrl {
        (**self).url()
    }

    async fn list_records(
        &self,
        collection: &Collection,
        limit: Option<u32>,
    ) -> Result<Vec<PhotoRecord>> {
        (**self).list_records(collection, limit).await
    }
}
