//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use todo_core::{Snapshot, Todo};

/// Characters of the id shown in human output
const SHORT_ID_LEN: usize = 8;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single todo
    pub fn print_todo(&self, todo: &Todo) {
        match self.format {
            OutputFormat::Human => println!("{}", todo_line(todo)),
            OutputFormat::Json => match serde_json::to_string_pretty(todo) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to encode todo: {}", e),
            },
            OutputFormat::Quiet => println!("{}", todo.id),
        }
    }

    /// Print the list held by a snapshot
    pub fn print_snapshot(&self, snapshot: &Snapshot) {
        match self.format {
            OutputFormat::Human => {
                if snapshot.todos.is_empty() {
                    println!("No todos.");
                    return;
                }
                for todo in &snapshot.todos {
                    println!("{}", todo_line(todo));
                }
                println!();
                println!(
                    "{} todo(s), {} completed",
                    snapshot.todos.len(),
                    snapshot.completed_count()
                );
            }
            OutputFormat::Json => match serde_json::to_string_pretty(&snapshot.todos) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to encode todos: {}", e),
            },
            OutputFormat::Quiet => {
                for todo in &snapshot.todos {
                    println!("{}", todo.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// One-line rendering: checkbox, short id, text
fn todo_line(todo: &Todo) -> String {
    let mark = if todo.completed { "x" } else { " " };
    format!("[{}] {}  {}", mark, short_id(&todo.id), todo.text)
}

/// First characters of an id, enough to pass back as a prefix
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
