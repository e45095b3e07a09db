//! Configuration Module
//!
//! Selects and connects the store backend from environment variables.

use std::env;
use std::sync::Arc;

use crate::error::StoreResult;
use crate::store::{MemoryStore, StoreClient};

/// Default Redis connection URL.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/0";

/// Store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// In-process store, lost when the process exits
    Memory,
    /// External Redis server
    #[cfg(feature = "redis-backend")]
    Redis,
}

impl Backend {
    /// Parses a backend name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Backend::Memory),
            #[cfg(feature = "redis-backend")]
            "redis" => Some(Backend::Redis),
            _ => None,
        }
    }
}

#[cfg(feature = "redis-backend")]
impl Default for Backend {
    fn default() -> Self {
        Backend::Redis
    }
}

#[cfg(not(feature = "redis-backend"))]
impl Default for Backend {
    fn default() -> Self {
        Backend::Memory
    }
}

/// Store connection parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which store backend to use
    pub backend: Backend,
    /// Redis connection URL, ignored by the memory backend
    pub redis_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `memory` or `redis` (unknown values use the default)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379/0)
    pub fn from_env() -> Self {
        Self {
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| Backend::parse(&v))
                .unwrap_or_default(),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
        }
    }

    /// Opens a client for the configured backend.
    pub fn connect(&self) -> StoreResult<Arc<dyn StoreClient>> {
        match self.backend {
            Backend::Memory => Ok(Arc::new(MemoryStore::new())),
            #[cfg(feature = "redis-backend")]
            Backend::Redis => Ok(Arc::new(crate::store::RedisStore::open(&self.redis_url)?)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::default());
        assert_eq!(config.redis_url, DEFAULT_REDIS_URL);
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(Backend::parse("memory"), Some(Backend::Memory));
        assert_eq!(Backend::parse(" MEMORY "), Some(Backend::Memory));
        assert_eq!(Backend::parse("postgres"), None);
    }

    #[test]
    fn test_connect_memory_backend() {
        let config = Config {
            backend: Backend::Memory,
            redis_url: DEFAULT_REDIS_URL.to_string(),
        };
        let store = config.connect().unwrap();
        store.set("k", b"v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v".to_vec()));
    }
}
