//! Call History
//!
//! Records the inputs and outputs of an operation as two positionally
//! correlated store lists.

use tracing::debug;

use crate::error::StoreResult;
use crate::instrument::{Call, Interceptor};
use crate::store::StoreClient;

/// Key of the list holding rendered arguments for `operation`.
pub fn inputs_key(operation: &str) -> String {
    format!("{}:inputs", operation)
}

/// Key of the list holding rendered results for `operation`.
pub fn outputs_key(operation: &str) -> String {
    format!("{}:outputs", operation)
}

// == Call History ==
/// Appends the rendered arguments before each invocation and the rendered
/// result after it.
///
/// A failing invocation records its input but no output, so the two lists
/// drift apart by one entry. Entry `i` of both lists only belong to the same
/// call when invocations are not interleaved.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallHistory;

impl Interceptor for CallHistory {
    fn before(&self, store: &dyn StoreClient, call: &Call<'_>) -> StoreResult<()> {
        let len = store.rpush(&inputs_key(call.operation), call.args.as_bytes())?;
        debug!(operation = call.operation, len, "input recorded");
        Ok(())
    }

    fn after(&self, store: &dyn StoreClient, call: &Call<'_>, output: &str) -> StoreResult<()> {
        let len = store.rpush(&outputs_key(call.operation), output.as_bytes())?;
        debug!(operation = call.operation, len, "output recorded");
        Ok(())
    }
}
