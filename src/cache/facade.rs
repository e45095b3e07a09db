//! Cache Facade Module
//!
//! Public cache object: writes values under generated keys through the
//! instrumentation chain and reads them back, raw or decoded.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::StoredValue;
use crate::error::{CacheError, Result};
use crate::instrument::{Call, CallCounter, CallHistory, InterceptorChain, Operation};
use crate::store::StoreClient;

/// Qualified name of [`Cache::store`], root of its metadata keys.
pub const STORE_OPERATION: &str = "Cache.store";

// == Cache ==
/// Key-value cache over an injected store client.
///
/// Every `store` call is counted and its input/output recorded under
/// [`STORE_OPERATION`]. Reads are not instrumented.
pub struct Cache {
    /// Shared store client
    store: Arc<dyn StoreClient>,
    /// Interceptors wrapped around `store`
    chain: InterceptorChain,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache with history recording outside call counting.
    ///
    /// Flushes the whole store namespace first, including data written by any
    /// other cache sharing the same store.
    pub fn new(store: Arc<dyn StoreClient>) -> Result<Self> {
        let chain = InterceptorChain::new().with(CallHistory).with(CallCounter);
        Self::with_chain(store, chain)
    }

    /// Creates a cache with an explicit interceptor chain.
    ///
    /// Flushes the store namespace like [`Cache::new`].
    pub fn with_chain(store: Arc<dyn StoreClient>, chain: InterceptorChain) -> Result<Self> {
        store.flush_all()?;
        info!(interceptors = chain.len(), "Cache initialized, store namespace flushed");

        Ok(Self { store, chain })
    }

    // == Store ==
    /// Writes `value` under a fresh UUID v4 key and returns the key.
    ///
    /// Store failures are returned as `CacheError::Store`.
    pub fn store(&self, value: impl Into<StoredValue>) -> Result<String> {
        let value = value.into();
        let call = Call::new(STORE_OPERATION, &[&value])?;

        self.chain.invoke(self.store.as_ref(), &call, || {
            let key = Uuid::new_v4().to_string();
            self.store.set(&key, &value.to_bytes())?;
            debug!(%key, "value stored");
            Ok(key)
        })
    }

    // == Get ==
    /// Reads the raw bytes under `key`, `None` when absent.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.store.get(key)?)
    }

    /// Reads the raw bytes under `key` and hands them to `decode`.
    ///
    /// `decode` also receives `None` for an absent key and must handle it.
    pub fn get_with<T, F>(&self, key: &str, decode: F) -> Result<T>
    where
        F: FnOnce(Option<Vec<u8>>) -> T,
    {
        Ok(decode(self.get(key)?))
    }

    // == Get String ==
    /// Reads the value under `key` as UTF-8 text.
    ///
    /// Fails with `Missing` for an absent key and `Decode` for invalid UTF-8.
    pub fn get_str(&self, key: &str) -> Result<String> {
        let raw = self
            .get(key)?
            .ok_or_else(|| CacheError::Missing(key.to_string()))?;
        Ok(String::from_utf8(raw)?)
    }

    // == Get Integer ==
    /// Reads the value under `key` as a decimal integer.
    ///
    /// Unlike [`Cache::get_str`], an absent key, invalid UTF-8, or text that is
    /// not an integer all yield 0. Store failures are still returned.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get_with(key, |raw| {
            raw.and_then(|bytes| String::from_utf8(bytes).ok())
                .and_then(|text| text.trim().parse().ok())
                .unwrap_or(0)
        })
    }

    // == Instrumentation ==
    /// Returns the instrumented `store` operation bound to this cache's store.
    pub fn store_operation(&self) -> Operation<'_> {
        Operation::new(STORE_OPERATION, self.store.as_ref())
    }

    /// Reads the call counter for `operation`, 0 when never called.
    pub fn call_count(&self, operation: &str) -> Result<u64> {
        Operation::new(operation, self.store.as_ref()).call_count()
    }

    /// Returns the underlying store client.
    pub fn client(&self) -> &Arc<dyn StoreClient> {
        &self.store
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").field("chain", &self.chain).finish_non_exhaustive()
    }
}
