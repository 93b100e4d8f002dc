//! REST layer: router, handlers and error mapping

mod handlers;
mod routes;

pub use handlers::{AppState, RestError};
pub use routes::create_router;
