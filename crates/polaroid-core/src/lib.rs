//! polaroid-core - Core gallery feed types and traits.

pub mod api_key;
pub mod error;
pub mod record;
pub mod traits;
pub mod types;

pub use api_key::ApiKey;
pub use error::Error;
pub use record::{PhotoRecord, RecordId, sort_newest_first};
pub use traits::RecordStore;
pub use types::{Collection, StoreUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
