//! Client view state and reconciliation
//!
//! The functions here take the current list plus a server-confirmed result
//! and return the next list. They never look at anything the server did not
//! confirm.
//!
//! Invariants kept by every function:
//! - at most one entry per id
//! - order is append-on-create, otherwise stable

use serde::Serialize;

use crate::models::Todo;

/// What a renderer sees after each transition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Local mirror of the store, in display order
    pub todos: Vec<Todo>,
    /// Pending input text
    pub input: String,
    /// Message of the most recent failed action, cleared on the next success
    pub last_error: Option<String>,
    /// Whether a list has been loaded from the service
    pub loaded: bool,
    /// Incremented on every published change
    pub revision: u64,
}

impl Snapshot {
    /// Number of completed todos
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }
}

/// Replace the list with a full server listing
///
/// Keeps the received order; a repeated id keeps its first position.
pub fn reconcile_listed(listed: Vec<Todo>) -> Vec<Todo> {
    let mut todos: Vec<Todo> = Vec::with_capacity(listed.len());
    for todo in listed {
        match todos.iter().position(|t| t.id == todo.id) {
            Some(pos) => todos[pos] = todo,
            None => todos.push(todo),
        }
    }
    todos
}

/// Append a created record
///
/// If the id is already present the entry is replaced in place.
pub fn reconcile_created(mut todos: Vec<Todo>, created: Todo) -> Vec<Todo> {
    match todos.iter().position(|t| t.id == created.id) {
        Some(pos) => todos[pos] = created,
        None => todos.push(created),
    }
    todos
}

/// Replace the entry matching the updated record's id
///
/// The whole record is swapped so any server-side field change shows up.
pub fn reconcile_updated(mut todos: Vec<Todo>, updated: Todo) -> Vec<Todo> {
    if let Some(pos) = todos.iter().position(|t| t.id == updated.id) {
        todos[pos] = updated;
    }
    todos
}

/// Drop the entry with `id`
pub fn reconcile_deleted(mut todos: Vec<Todo>, id: &str) -> Vec<Todo> {
    todos.retain(|t| t.id != id);
    todos
}
