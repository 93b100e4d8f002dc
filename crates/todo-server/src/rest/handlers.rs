use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tokio::sync::Mutex;
use tracing::{error, info};

use todo_core::sync::SharedStore;
use todo_core::{CreateTodo, ErrorResponse, StoreError, Todo, TodoStore, UpdateTodo};

/// Shared application state
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: TodoStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// API error response
#[derive(Debug)]
pub struct RestError {
    pub status: StatusCode,
    pub message: String,
}

impl RestError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            error: self.message,
            code: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for RestError {
    fn from(e: StoreError) -> Self {
        if !e.is_client_error() {
            error!("Store failure: {}", e);
            return RestError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "internal store error".to_string(),
            };
        }

        match e {
            StoreError::NotFound(id) => RestError {
                status: StatusCode::NOT_FOUND,
                message: format!("todo not found: {}", id),
            },
            StoreError::Validation(msg) => RestError::bad_request(msg),
            other => RestError::bad_request(other.to_string()),
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::bad_request(rejection.body_text())
    }
}

// === Todos ===

/// List all todos in creation order
pub async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Todo>>, RestError> {
    let todos = state.store.lock().await.list()?;
    Ok(Json(todos))
}

/// Create a todo
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), RestError> {
    let Json(req) = body?;
    let todo = state.store.lock().await.create(&req.text)?;
    info!("Created todo {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Set the completion flag of a todo
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, RestError> {
    let Json(req) = body?;
    let todo = state.store.lock().await.update(&id, req.completed)?;
    Ok(Json(todo))
}

/// Delete a todo
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, RestError> {
    state.store.lock().await.delete(&id)?;
    info!("Deleted todo {}", id);
    Ok(StatusCode::NO_CONTENT)
}
