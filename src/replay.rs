//! Replay Module
//!
//! Read-only rendering of the recorded calls of an instrumented operation.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::instrument::{inputs_key, outputs_key, Operation};

// == History Entry ==
/// One recorded call: rendered arguments and rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub input: String,
    pub output: String,
}

// == Replay Report ==
/// Call count and input/output history of one operation, in call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Qualified operation name
    pub operation: String,
    /// Value of the call counter
    pub calls: u64,
    /// Recorded calls that produced an output
    pub entries: Vec<HistoryEntry>,
}

impl ReplayReport {
    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.operation, self.calls)?;
        for entry in &self.entries {
            write!(f, "\n{}(*{}) -> {}", self.operation, entry.input, entry.output)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Reads the call count and history recorded for `operation`.
///
/// Inputs and outputs are paired by position. Inputs of calls that failed
/// have no output and are left out of the entries; the count still includes
/// them. Never writes to the store.
pub fn replay(operation: &Operation<'_>) -> Result<ReplayReport> {
    let name = operation.name();
    let store = operation.store();

    let calls = operation.call_count()?;
    let inputs = store.lrange(&inputs_key(name), 0, -1)?;
    let outputs = store.lrange(&outputs_key(name), 0, -1)?;

    let entries = inputs
        .iter()
        .zip(outputs.iter())
        .map(|(input, output)| HistoryEntry {
            input: String::from_utf8_lossy(input).into_owned(),
            output: String::from_utf8_lossy(output).into_owned(),
        })
        .collect();

    Ok(ReplayReport {
        operation: name.to_string(),
        calls,
        entries,
    })
}
