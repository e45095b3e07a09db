//! Store Entry Module
//!
//! Defines the values held by the in-memory store.

use crate::error::{StoreError, StoreResult};

// == Store Entry ==
/// A single value in the store keyspace.
///
/// Byte values and lists share one keyspace; a key holds exactly one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEntry {
    /// Plain byte value, written by `set` and `incr`
    Bytes(Vec<u8>),
    /// Ordered list, written by `rpush`
    List(Vec<Vec<u8>>),
}

impl StoreEntry {
    // == Byte Access ==
    /// Returns the byte value, or `WrongType` if the entry is a list.
    pub fn bytes(&self, key: &str) -> StoreResult<&[u8]> {
        match self {
            StoreEntry::Bytes(value) => Ok(value),
            StoreEntry::List(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    // == List Access ==
    /// Returns the list, or `WrongType` if the entry is a byte value.
    pub fn list(&self, key: &str) -> StoreResult<&[Vec<u8>]> {
        match self {
            StoreEntry::List(items) => Ok(items),
            StoreEntry::Bytes(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    /// Mutable variant of [`StoreEntry::list`].
    pub fn list_mut(&mut self, key: &str) -> StoreResult<&mut Vec<Vec<u8>>> {
        match self {
            StoreEntry::List(items) => Ok(items),
            StoreEntry::Bytes(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    // == Integer Access ==
    /// Parses the byte value as a base-10 signed 64-bit integer.
    pub fn integer(&self, key: &str) -> StoreResult<i64> {
        std::str::from_utf8(self.bytes(key)?)
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| StoreError::NotAnInteger(key.to_string()))
    }
}

// == Utility Functions ==
/// Resolves inclusive, possibly negative list indices against `len`.
///
/// Returns the half-open `start..end` slice bounds, or `None` when the
/// range selects nothing.
pub fn resolve_range(len: usize, start: isize, end: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let end = if end < 0 { len + end } else { end.min(len - 1) };

    if len == 0 || start > end || start >= len {
        return None;
    }
    Some((start as usize, end as usize + 1))
}
