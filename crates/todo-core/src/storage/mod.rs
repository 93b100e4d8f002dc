//! Storage layer
//!
//! SQLite holds the canonical todo collection. The schema and the typed
//! errors live here; `crate::store::TodoStore` is the public entry point.

pub mod error;
pub mod schema;

pub use error::{StoreError, StoreResult};
