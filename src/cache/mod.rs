//! Cache Module
//!
//! Cache facade composing a store client with call instrumentation.

mod facade;
mod value;


// Re-export public types
pub use facade::{Cache, STORE_OPERATION};
pub use value::StoredValue;
