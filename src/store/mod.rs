//! Store Module
//!
//! Thin client contract over an external key-value store, plus the backends
//! that implement it.

mod entry;
mod memory;
#[cfg(feature = "redis-backend")]
mod redis_store;

pub use entry::StoreEntry;
pub use memory::MemoryStore;
#[cfg(feature = "redis-backend")]
pub use redis_store::RedisStore;

use crate::error::StoreResult;

// == Store Client ==
/// The six store commands the cache layer relies on.
///
/// Implementations pass failures through without retrying or translating them.
/// Every call may mutate store-resident state, so implementations must be safe
/// to share between threads.
pub trait StoreClient: Send + Sync {
    /// Writes `value` under `key`, replacing whatever was there.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Reads the bytes under `key`, `None` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically adds one to the integer under `key` and returns the new value.
    ///
    /// An absent key counts as zero.
    fn incr(&self, key: &str) -> StoreResult<i64>;

    /// Appends `value` to the tail of the list under `key`, returning the new length.
    fn rpush(&self, key: &str, value: &[u8]) -> StoreResult<usize>;

    /// Returns list elements from `start` to `end` inclusive.
    ///
    /// Negative indices count from the tail, so `(0, -1)` is the whole list.
    fn lrange(&self, key: &str, start: isize, end: isize) -> StoreResult<Vec<Vec<u8>>>;

    /// Clears the whole namespace.
    fn flush_all(&self) -> StoreResult<()>;
}
