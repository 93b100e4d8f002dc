//! Todo REST service
//!
//! Exposes the canonical `TodoStore` over HTTP/JSON:
//!
//! - `GET /todos`
//! - `POST /todos`
//! - `PATCH /todos/{id}`
//! - `DELETE /todos/{id}`

pub mod rest;

pub use rest::{create_router, AppState};
