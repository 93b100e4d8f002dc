//! Transport abstraction for the sync client
//!
//! `TodoApi` is the four-call protocol the client speaks. The HTTP
//! implementation lives in `http.rs`; `LocalTodoApi` talks to a store in the
//! same process.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::error::ApiResult;
use crate::models::Todo;
use crate::store::TodoStore;

/// The remote todo service as seen by a client
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// Fetch all todos in store order
    async fn list(&self) -> ApiResult<Vec<Todo>>;

    /// Create a todo; the service assigns the id
    async fn create(&self, text: &str) -> ApiResult<Todo>;

    /// Set the completion flag and return the full record
    async fn update(&self, id: &str, completed: bool) -> ApiResult<Todo>;

    /// Remove a todo
    async fn delete(&self, id: &str) -> ApiResult<()>;
}

/// Store shared between request handlers
pub type SharedStore = Arc<Mutex<TodoStore>>;

/// In-process transport over a shared store
#[derive(Clone)]
pub struct LocalTodoApi {
    store: SharedStore,
}

impl LocalTodoApi {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Wrap an owned store
    pub fn from_store(store: TodoStore) -> Self {
        Self::new(Arc::new(Mutex::new(store)))
    }
}

#[async_trait]
impl TodoApi for LocalTodoApi {
    async fn list(&self) -> ApiResult<Vec<Todo>> {
        Ok(self.store.lock().await.list()?)
    }

    async fn create(&self, text: &str) -> ApiResult<Todo> {
        Ok(self.store.lock().await.create(text)?)
    }

    async fn update(&self, id: &str, completed: bool) -> ApiResult<Todo> {
        Ok(self.store.lock().await.update(id, completed)?)
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        Ok(self.store.lock().await.delete(id)?)
    }
}

#[async_trait]
impl<T: TodoApi + ?Sized> TodoApi for Arc<T> {
    async fn list(&self) -> ApiResult<Vec<Todo>> {
        (**self).list().await
    }

    async fn create(&self, text: &str) -> ApiResult<Todo> {
        (**self).create(text).await
    }

    async fn update(&self, id: &str, completed: bool) -> ApiResult<Todo> {
        (**self).update(id, completed).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        (**self).delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_api_round_trip() {
        let api = LocalTodoApi::from_store(TodoStore::open_in_memory().unwrap());

        let todo = api.create("buy milk").await.unwrap();
        let updated = api.update(&todo.id, true).await.unwrap();
        assert!(updated.completed);

        let list = api.list().await.unwrap();
        assert_eq!(list.len(), 1);

        api.delete(&todo.id).await.unwrap();
        assert!(api.delete(&todo.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_local_api_maps_validation() {
        let api = LocalTodoApi::from_store(TodoStore::open_in_memory().unwrap());
        let err = api.create("  ").await.unwrap_err();
        assert!(matches!(err, crate::sync::ApiError::Validation(_)));
    }
}
