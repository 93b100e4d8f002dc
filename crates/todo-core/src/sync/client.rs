//! Sync client implementation
//!
//! Mirrors the service's todo list and applies changes only after the
//! service confirms them. Every action takes `&mut self`, so a client has at
//! most one request in flight.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::api::TodoApi;
use super::error::{ApiError, ApiResult};
use super::state::{
    reconcile_created, reconcile_deleted, reconcile_listed, reconcile_updated, Snapshot,
};
use crate::models::{normalize_text, Todo};

/// Reconciling client for a todo service
pub struct SyncClient<A: TodoApi> {
    /// Transport to the service
    api: A,
    /// Current view state
    state: Snapshot,
    /// Publishes every state change
    snapshot_tx: watch::Sender<Snapshot>,
}

impl<A: TodoApi> SyncClient<A> {
    /// Create a client with an empty list
    pub fn new(api: A) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        Self {
            api,
            state: Snapshot::default(),
            snapshot_tx,
        }
    }

    /// The transport in use
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current local list
    pub fn todos(&self) -> &[Todo] {
        &self.state.todos
    }

    /// Find a local entry by id
    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.state.todos.iter().find(|t| t.id == id)
    }

    /// Current input buffer
    pub fn input(&self) -> &str {
        &self.state.input
    }

    /// Error message of the last failed action, if the last action failed
    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        self.state.clone()
    }

    /// Subscribe to state changes
    ///
    /// The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Replace the input buffer
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
        self.publish();
    }

    /// Load the full list from the service
    ///
    /// On failure the local list is left as it was (empty on first load).
    pub async fn initialize(&mut self) -> ApiResult<()> {
        match self.api.list().await {
            Ok(listed) => {
                self.state.todos = reconcile_listed(listed);
                self.state.loaded = true;
                self.state.last_error = None;
                info!("Loaded {} todos", self.state.todos.len());
                self.publish();
                Ok(())
            }
            Err(e) => Err(self.report("initialize", e)),
        }
    }

    /// Create a todo from raw user text
    ///
    /// Blank text is ignored without contacting the service and yields
    /// `Ok(None)`. On success the record is appended and the input buffer
    /// cleared; on failure both are untouched.
    pub async fn add_todo(&mut self, raw_text: &str) -> ApiResult<Option<Todo>> {
        let Some(text) = normalize_text(raw_text) else {
            debug!("Ignoring blank todo text");
            return Ok(None);
        };

        match self.api.create(text).await {
            Ok(created) => {
                let todos = std::mem::take(&mut self.state.todos);
                self.state.todos = reconcile_created(todos, created.clone());
                self.state.input.clear();
                self.state.last_error = None;
                self.publish();
                Ok(Some(created))
            }
            Err(e) => Err(self.report("add", e)),
        }
    }

    /// Create a todo from the input buffer
    pub async fn submit_input(&mut self) -> ApiResult<Option<Todo>> {
        let raw = self.state.input.clone();
        self.add_todo(&raw).await
    }

    /// Flip the completion flag of a local todo
    ///
    /// Returns `Ok(None)` without contacting the service when `id` is not in
    /// the local list.
    pub async fn toggle_todo(&mut self, id: &str) -> ApiResult<Option<Todo>> {
        let Some(current) = self.get(id).map(|t| t.completed) else {
            debug!("Toggle for unknown local id {}", id);
            return Ok(None);
        };

        match self.api.update(id, !current).await {
            Ok(updated) => {
                let todos = std::mem::take(&mut self.state.todos);
                self.state.todos = reconcile_updated(todos, updated.clone());
                self.state.last_error = None;
                self.publish();
                Ok(Some(updated))
            }
            Err(e) => Err(self.report("toggle", e)),
        }
    }

    /// Delete a todo on the service, then locally
    pub async fn delete_todo(&mut self, id: &str) -> ApiResult<()> {
        match self.api.delete(id).await {
            Ok(()) => {
                let todos = std::mem::take(&mut self.state.todos);
                self.state.todos = reconcile_deleted(todos, id);
                self.state.last_error = None;
                self.publish();
                Ok(())
            }
            Err(e) => Err(self.report("delete", e)),
        }
    }

    /// Log a failed action and record it; the list is not touched
    fn report(&mut self, action: &str, error: ApiError) -> ApiError {
        warn!("Failed to {} todo: {}", action, error);
        self.state.last_error = Some(format!("{}: {}", action, error));
        self.publish();
        error
    }

    fn publish(&mut self) {
        self.state.revision += 1;
        self.snapshot_tx.send_replace(self.state.clone());
    }
}
