//! Core traits for record store behavior.

mod store;

pub use store::RecordStore;
