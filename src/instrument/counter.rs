//! Call Counter
//!
//! Counts invocations of an operation in a store counter.

use tracing::debug;

use crate::error::StoreResult;
use crate::instrument::{Call, Interceptor};
use crate::store::StoreClient;

// == Call Counter ==
/// Increments the counter keyed by the operation's qualified name before
/// every invocation.
///
/// The increment is not undone if the operation then fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallCounter;

impl Interceptor for CallCounter {
    fn before(&self, store: &dyn StoreClient, call: &Call<'_>) -> StoreResult<()> {
        let count = store.incr(call.operation)?;
        debug!(operation = call.operation, count, "call counted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::instrument::InterceptorChain;
    use crate::store::MemoryStore;

    #[test]
    fn test_counts_each_call() {
        let store = MemoryStore::new();
        let chain = InterceptorChain::new().with(CallCounter);
        let call = Call::new("Op.run", &["x"]).unwrap();

        for _ in 0..3 {
            chain.invoke(&store, &call, || Ok("ok")).unwrap();
        }

        assert_eq!(store.get("Op.run").unwrap(), Some(b"3".to_vec()));
    }

    #[test]
    fn test_counts_failed_calls() {
        let store = MemoryStore::new();
        let chain = InterceptorChain::new().with(CallCounter);
        let call = Call::new("Op.run", &["x"]).unwrap();

        let result: crate::error::Result<String> =
            chain.invoke(&store, &call, || Err(CacheError::Missing("x".to_string())));

        assert!(result.is_err());
        assert_eq!(store.get("Op.run").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn test_counter_store_failure_aborts_call() {
        let store = MemoryStore::new();
        store.rpush("Op.run", b"not a counter").unwrap();
        let chain = InterceptorChain::new().with(CallCounter);
        let call = Call::new("Op.run", &["x"]).unwrap();

        let mut ran = false;
        let result = chain.invoke(&store, &call, || {
            ran = true;
            Ok(1)
        });

        assert!(matches!(result, Err(CacheError::Store(_))));
        assert!(!ran);
    }
}
