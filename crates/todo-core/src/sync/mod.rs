//! Client-side synchronization with the todo service
//!
//! `SyncClient` keeps a local copy of the service's list and reconciles it
//! with the record each call returns.
//!
//! ## Protocol
//!
//! One round trip per action:
//! 1. Call the service (`TodoApi`)
//! 2. Wait for the authoritative result
//! 3. Apply it to the local list by id
//! 4. Publish a new `Snapshot`
//!
//! A failed call changes nothing but `Snapshot::last_error`.
//!
//! ## Usage
//!
//! ```ignore
//! let api = HttpTodoApi::from_config(&config)?;
//! let mut client = SyncClient::new(api);
//! client.initialize().await?;
//! client.add_todo("buy milk").await?;
//! ```

mod api;
mod client;
mod error;
mod http;
mod state;

pub use api::{LocalTodoApi, SharedStore, TodoApi};
pub use client::SyncClient;
pub use error::{ApiError, ApiResult};
pub use http::HttpTodoApi;
pub use state::{
    reconcile_created, reconcile_deleted, reconcile_listed, reconcile_updated, Snapshot,
};
