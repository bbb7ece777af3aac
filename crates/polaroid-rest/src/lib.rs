//! polaroid-rest - PostgREST-backed record store.

mod client;
mod store;

pub use client::DEFAULT_TIMEOUT;
pub use store::RestStore;
