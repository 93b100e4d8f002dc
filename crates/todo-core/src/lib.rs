//! Todo Core Library
//!
//! This crate provides the core functionality for todo, a small task list
//! backed by a REST service.
//!
//! # Architecture
//!
//! - **TodoStore**: canonical collection, SQLite-backed, assigns ids
//! - **SyncClient**: local mirror of the collection, reconciled after every
//!   confirmed call
//!
//! The store is the only source of truth. The client never changes its list
//! before the service has answered.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut client = SyncClient::new(HttpTodoApi::from_config(&config)?);
//!
//! client.initialize().await?;
//! client.add_todo("buy milk").await?;
//! ```
//!
//! # Modules
//!
//! - `store`: canonical collection (server side)
//! - `models`: `Todo` and request bodies
//! - `storage`: SQLite schema and store errors
//! - `sync`: client, transports and reconciliation
//! - `config`: application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod store;
pub mod sync;

pub use config::Config;
pub use models::{CreateTodo, ErrorResponse, Todo, UpdateTodo};
pub use storage::{StoreError, StoreResult};
pub use store::TodoStore;
pub use sync::{ApiError, ApiResult, HttpTodoApi, LocalTodoApi, Snapshot, SyncClient, TodoApi};
