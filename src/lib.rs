//! Instrumented Cache - A key-value cache facade with call instrumentation
//!
//! Stores values under generated keys in an external key-value store, counts
//! calls, records their inputs and outputs, and replays that history.

pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod replay;
pub mod store;

pub use cache::{Cache, StoredValue, STORE_OPERATION};
pub use config::Config;
pub use error::{CacheError, Result, StoreError};
pub use replay::{replay, ReplayReport};
pub use store::{MemoryStore, StoreClient};
