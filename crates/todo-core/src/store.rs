//! Canonical todo collection
//!
//! `TodoStore` is the only source of truth for todo records. It assigns ids,
//! validates input and keeps records in insertion order.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = TodoStore::open_with_config(&config)?;
//!
//! let todo = store.create("buy milk")?;
//! store.update(&todo.id, true)?;
//! store.delete(&todo.id)?;
//! ```
//!
//! Every operation runs in its own SQLite transaction, so each one is atomic.
//! Callers that share a store between tasks wrap it in a mutex.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::models::{normalize_text, Todo};
use crate::storage::schema::{init_schema, needs_init, schema_version, SCHEMA_VERSION};
use crate::storage::{StoreError, StoreResult};

const SELECT_COLUMNS: &str = "id, text, completed, created_at, updated_at";

/// SQLite-backed todo collection
pub struct TodoStore {
    conn: Connection,
}

impl TodoStore {
    /// Open the store at the configured database path
    pub fn open_with_config(config: &Config) -> StoreResult<Self> {
        Self::open(&config.database_path())
    }

    /// Open or create the database at `path`
    ///
    /// Creates parent directories and the schema on first use.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::from_io(e, parent.to_path_buf()))?;
            }
        }

        let conn = Connection::open(path)?;
        if needs_init(&conn) {
            init_schema(&conn)?;
        } else if let Some(version) = schema_version(&conn).filter(|v| *v != SCHEMA_VERSION) {
            warn!(
                "Database {:?} has schema version {}, expected {}",
                path, version, SCHEMA_VERSION
            );
        }

        debug!("Opened todo store at {:?}", path);
        Ok(Self { conn })
    }

    /// Open an in-memory store (tests and ephemeral servers)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// All todos in insertion order
    pub fn list(&self) -> StoreResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SELECT_COLUMNS} FROM todos ORDER BY seq"))?;

        let todos = stmt
            .query_map([], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(todos)
    }

    /// Get a todo by id
    pub fn get(&self, id: &str) -> StoreResult<Option<Todo>> {
        let todo = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM todos WHERE id = ?1"),
                params![id],
                row_to_todo,
            )
            .optional()?;
        Ok(todo)
    }

    /// Number of stored todos
    pub fn count(&self) -> StoreResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Create a todo from user text
    ///
    /// The text is trimmed; blank text is rejected with `Validation`.
    pub fn create(&mut self, text: &str) -> StoreResult<Todo> {
        let text = normalize_text(text)
            .ok_or_else(|| StoreError::Validation("text must not be empty".to_string()))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp_millis();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO todos (id, text, completed, created_at, updated_at) VALUES (?1, ?2, 0, ?3, ?3)",
            params![id, text, now],
        )?;
        let todo = tx.query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM todos WHERE id = ?1"),
            params![id],
            row_to_todo,
        )?;
        tx.commit()?;

        debug!("Created todo {}", todo.id);
        Ok(todo)
    }

    /// Set the completion flag of a todo
    ///
    /// Setting the value it already has leaves the record untouched,
    /// including `updated_at`.
    pub fn update(&mut self, id: &str, completed: bool) -> StoreResult<Todo> {
        let now = Utc::now().timestamp_millis();

        let tx = self.conn.transaction()?;
        let matched = tx.execute(
            r#"
            UPDATE todos
            SET updated_at = CASE WHEN completed = ?1 THEN updated_at ELSE ?2 END,
                completed = ?1
            WHERE id = ?3
            "#,
            params![completed, now, id],
        )?;
        if matched == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let todo = tx.query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM todos WHERE id = ?1"),
            params![id],
            row_to_todo,
        )?;
        tx.commit()?;

        debug!("Updated todo {} completed={}", id, completed);
        Ok(todo)
    }

    /// Remove a todo
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        debug!("Deleted todo {}", id);
        Ok(())
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let created_at: i64 = row.get(3)?;
    let updated_at: i64 = row.get(4)?;
    Ok(Todo {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get(2)?,
        created_at: DateTime::from_timestamp_millis(created_at),
        updated_at: DateTime::from_timestamp_millis(updated_at),
    })
}
