//! Instrumentation Module
//!
//! Interceptors that record call metadata into the store around an operation
//! without altering its result.
//!
//! A chain is composed explicitly when the owning object is built:
//!
//! ```
//! use instrumented_cache::instrument::{CallCounter, CallHistory, InterceptorChain};
//!
//! let chain = InterceptorChain::new().with(CallHistory).with(CallCounter);
//! assert_eq!(chain.len(), 2);
//! ```

mod counter;
mod history;

pub use counter::CallCounter;
pub use history::{inputs_key, outputs_key, CallHistory};

use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use crate::error::{CacheError, Result, StoreResult};
use crate::store::StoreClient;

// == Call ==
/// One invocation of an instrumented operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    /// Qualified operation name, root of every metadata key
    pub operation: &'a str,
    /// Positional arguments rendered as a JSON array
    pub args: String,
}

impl<'a> Call<'a> {
    /// Renders `args` for display and history storage.
    pub fn new<A: Serialize + ?Sized>(operation: &'a str, args: &A) -> Result<Self> {
        Ok(Self {
            operation,
            args: serde_json::to_string(args)?,
        })
    }
}

// == Operation ==
/// An instrumented operation bound to the store its metadata lives in.
#[derive(Clone, Copy)]
pub struct Operation<'a> {
    name: &'a str,
    store: &'a dyn StoreClient,
}

impl<'a> Operation<'a> {
    pub fn new(name: &'a str, store: &'a dyn StoreClient) -> Self {
        Self { name, store }
    }

    /// Qualified operation name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn store(&self) -> &'a dyn StoreClient {
        self.store
    }

    /// Reads the call counter, zero when the operation was never counted.
    pub fn call_count(&self) -> Result<u64> {
        let Some(raw) = self.store.get(self.name)? else {
            return Ok(0);
        };
        String::from_utf8(raw)?
            .parse()
            .map_err(|_| CacheError::InvalidCounter(self.name.to_string()))
    }
}

impl std::fmt::Debug for Operation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation").field("name", &self.name).finish()
    }
}

// == Interceptor ==
/// Before/after hooks run around an instrumented operation.
pub trait Interceptor: Send + Sync {
    /// Runs before the operation. An error aborts the call.
    fn before(&self, store: &dyn StoreClient, call: &Call<'_>) -> StoreResult<()>;

    /// Runs after the operation returned normally, with its rendered output.
    fn after(&self, _store: &dyn StoreClient, _call: &Call<'_>, _output: &str) -> StoreResult<()> {
        Ok(())
    }
}

// == Interceptor Chain ==
/// Ordered interceptors, outermost first.
#[derive(Default)]
pub struct InterceptorChain {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Creates an empty chain; invoking it just runs the operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `interceptor` inside the ones already present.
    pub fn with<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    // == Invoke ==
    /// Runs `op` wrapped by every interceptor.
    ///
    /// `before` hooks run in chain order, `after` hooks in reverse order. When
    /// `op` fails its error is returned untouched and no `after` hook runs, so
    /// anything recorded by `before` hooks stays recorded.
    pub fn invoke<R, F>(&self, store: &dyn StoreClient, call: &Call<'_>, op: F) -> Result<R>
    where
        R: Display,
        F: FnOnce() -> Result<R>,
    {
        for interceptor in &self.interceptors {
            interceptor.before(store, call)?;
        }

        let output = op()?;
        debug!(operation = call.operation, args = %call.args, %output, "instrumented call returned");

        let rendered = output.to_string();
        for interceptor in self.interceptors.iter().rev() {
            interceptor.after(store, call, &rendered)?;
        }
        Ok(output)
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::{Arc, Mutex};

    /// Records hook order into a shared log.
    struct Probe {
        label: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Interceptor for Probe {
        fn before(&self, _store: &dyn StoreClient, _call: &Call<'_>) -> StoreResult<()> {
            self.log.lock().unwrap().push(format!("{}:before", self.label));
            Ok(())
        }

        fn after(&self, _store: &dyn StoreClient, _call: &Call<'_>, output: &str) -> StoreResult<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:after:{}", self.label, output));
            Ok(())
        }
    }

    fn probe_chain(log: &Arc<Mutex<Vec<String>>>) -> InterceptorChain {
        InterceptorChain::new()
            .with(Probe { label: "outer", log: log.clone() })
            .with(Probe { label: "inner", log: log.clone() })
    }

    #[test]
    fn test_call_renders_args_as_json() {
        let call = Call::new("Op.run", &["foo"]).unwrap();
        assert_eq!(call.args, r#"["foo"]"#);

        let call = Call::new("Op.run", &(1, "a")).unwrap();
        assert_eq!(call.args, r#"[1,"a"]"#);
    }

    #[test]
    fn test_operation_call_count() {
        let store = MemoryStore::new();
        let op = Operation::new("Op.run", &store);
        assert_eq!(op.call_count().unwrap(), 0);

        store.incr("Op.run").unwrap();
        store.incr("Op.run").unwrap();
        assert_eq!(op.call_count().unwrap(), 2);
        assert_eq!(op.name(), "Op.run");
    }

    #[test]
    fn test_operation_invalid_counter() {
        let store = MemoryStore::new();
        store.set("Op.run", b"-3").unwrap();

        let op = Operation::new("Op.run", &store);
        assert!(matches!(op.call_count(), Err(CacheError::InvalidCounter(_))));
    }

    #[test]
    fn test_empty_chain_passes_through() {
        let store = MemoryStore::new();
        let chain = InterceptorChain::new();
        let call = Call::new("Op.run", &[1]).unwrap();

        let result = chain.invoke(&store, &call, || Ok(7)).unwrap();
        assert_eq!(result, 7);
        assert!(chain.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_hooks_nest_around_operation() {
        let store = MemoryStore::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = probe_chain(&log);
        let call = Call::new("Op.run", &[1]).unwrap();

        let result = chain
            .invoke(&store, &call, || {
                log.lock().unwrap().push("op".to_string());
                Ok("done")
            })
            .unwrap();

        assert_eq!(result, "done");
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "outer:before",
                "inner:before",
                "op",
                "inner:after:done",
                "outer:after:done"
            ]
        );
    }

    #[test]
    fn test_failed_operation_skips_after_hooks() {
        let store = MemoryStore::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = probe_chain(&log);
        let call = Call::new("Op.run", &[1]).unwrap();

        let result: Result<String> =
            chain.invoke(&store, &call, || Err(CacheError::Missing("k".to_string())));

        assert!(matches!(result, Err(CacheError::Missing(_))));
        assert_eq!(*log.lock().unwrap(), vec!["outer:before", "inner:before"]);
    }
}
