//! Filesystem storage for a local record store.
//!
//! Each collection is a single JSON file, `<root>/<collection>.json`, holding
//! an array of rows in the hosted table's column layout. The files are only
//! ever read; they are edited by hand or exported from a hosted store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use polaroid_core::error::{Error, InvalidInputError};
use polaroid_core::traits::RecordStore;
use polaroid_core::{Collection, PhotoRecord, Result, StoreUrl, sort_newest_first};

/// Filesystem-backed record store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    url: StoreUrl,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>, url: StoreUrl) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            url,
        }
    }

    /// Create a file store from a `file://` URL.
    pub fn from_url(url: StoreUrl) -> Result<Self> {
        let root = url.to_file_path().ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::StoreUrl {
                value: url.to_string(),
                reason: "not a file:// URL".to_string(),
            })
        })?;
        Ok(Self::new(root, url))
    }

    /// Get the path of the file holding a collection.
    pub fn collection_path(&self, collection: &Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    fn url(&self) -> &StoreUrl {
        &self.url
    }

    #[instrument(skip(self), fields(%collection))]
    async fn list_records(
        &self,
        collection: &Collection,
        limit: Option<u32>,
    ) -> Result<Vec<PhotoRecord>> {
        let path = self.collection_path(collection);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Collection file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<PhotoRecord> = serde_json::from_slice(&bytes)?;
        sort_newest_first(&mut records);

        if let Some(limit) = limit {
            records.truncate(limit as usize);
        }

        debug!(count = records.len(), "Listed records");
        Ok(records)
    }
}
