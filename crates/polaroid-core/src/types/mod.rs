//! Validated store types.
//!
//! These types enforce their invariants at construction time,
//! so an invalid store URL or collection name cannot reach a request.

mod collection;
mod store_url;

pub use collection::Collection;
pub use store_url::StoreUrl;
