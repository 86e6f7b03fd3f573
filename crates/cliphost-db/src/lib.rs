//! Cliphost record store
//!
//! The persistence boundary for video records: the `VideoStore` trait plus
//! the SQLite-backed implementation. The upload pipeline only ever reads a
//! record once and writes it back at most once; concurrent updates to the
//! same record are last-write-wins with no locking.

mod store;

pub use store::{SqliteVideoStore, StoreError, VideoStore};
