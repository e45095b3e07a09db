//! Memory Store Module
//!
//! In-process backend with the same command semantics as the external store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::store::entry::resolve_range;
use crate::store::{StoreClient, StoreEntry};

// == Memory Store ==
/// HashMap-backed store guarded by a single lock.
///
/// Each command takes the lock once, so individual commands are atomic with
/// respect to each other, the same guarantee the external store gives.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoreEntry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of keys currently held.
    pub fn len(&self) -> usize {
        self.read().map(|entries| entries.len()).unwrap_or(0)
    }

    // == Is Empty ==
    /// Returns true if no keys are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, StoreEntry>>> {
        self.entries
            .read()
            .map_err(|_| StoreError::Internal("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, StoreEntry>>> {
        self.entries
            .write()
            .map_err(|_| StoreError::Internal("memory store lock poisoned".to_string()))
    }
}

impl StoreClient for MemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        trace!(command = "SET", key, "memory store");
        self.write()?
            .insert(key.to_string(), StoreEntry::Bytes(value.to_vec()));
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        trace!(command = "GET", key, "memory store");
        match self.read()?.get(key) {
            Some(entry) => Ok(Some(entry.bytes(key)?.to_vec())),
            None => Ok(None),
        }
    }

    fn incr(&self, key: &str) -> StoreResult<i64> {
        trace!(command = "INCR", key, "memory store");
        let mut entries = self.write()?;

        let current = match entries.get(key) {
            Some(entry) => entry.integer(key)?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::NotAnInteger(key.to_string()))?;

        entries.insert(
            key.to_string(),
            StoreEntry::Bytes(next.to_string().into_bytes()),
        );
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> StoreResult<usize> {
        trace!(command = "RPUSH", key, "memory store");
        let mut entries = self.write()?;

        let list = entries
            .entry(key.to_string())
            .or_insert_with(|| StoreEntry::List(Vec::new()))
            .list_mut(key)?;
        list.push(value.to_vec());
        Ok(list.len())
    }

    fn lrange(&self, key: &str, start: isize, end: isize) -> StoreResult<Vec<Vec<u8>>> {
        trace!(command = "LRANGE", key, start, end, "memory store");
        let entries = self.read()?;

        let Some(entry) = entries.get(key) else {
            return Ok(Vec::new());
        };
        let list = entry.list(key)?;

        Ok(match resolve_range(list.len(), start, end) {
            Some((from, to)) => list[from..to].to_vec(),
            None => Vec::new(),
        })
    }

    fn flush_all(&self) -> StoreResult<()> {
        trace!(command = "FLUSHDB", "memory store");
        self.write()?.clear();
        Ok(())
    }
}
