//! Error types for the instrumented cache
//!
//! Provides unified error handling using thiserror.

use std::string::FromUtf8Error;

use thiserror::Error;

// == Store Error Enum ==
/// Failures reported by a store client.
///
/// These are passed through the cache layer untouched.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Command issued against a key holding the other kind of value
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// Counter value is not a 64-bit integer, or would overflow
    #[error("Value is not an integer or out of range: {0}")]
    NotAnInteger(String),

    /// Backend-internal failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error returned by the Redis client
    #[cfg(feature = "redis-backend")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

// == Cache Error Enum ==
/// Unified error type for the cache facade and replay.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Store-layer failure, propagated as-is
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Key holds no value
    #[error("Key not found: {0}")]
    Missing(String),

    /// Stored bytes are not valid UTF-8
    #[error("Decode error: {0}")]
    Decode(#[from] FromUtf8Error),

    /// Call counter holds something other than a non-negative integer
    #[error("Invalid call counter for {0}")]
    InvalidCounter(String),

    /// Rendering arguments or a report as JSON failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// == Result Type Aliases ==
/// Convenience Result type for store clients.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Convenience Result type for the cache facade.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_transparent() {
        let err: CacheError = StoreError::WrongType("k".to_string()).into();
        assert_eq!(err.to_string(), "Wrong type for key: k");
        assert!(matches!(err, CacheError::Store(StoreError::WrongType(_))));
    }

    #[test]
    fn test_decode_error_from_utf8() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: CacheError = utf8_err.into();
        assert!(matches!(err, CacheError::Decode(_)));
        assert!(err.to_string().starts_with("Decode error"));
    }
}
