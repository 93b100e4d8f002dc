//! Todo command handlers
//!
//! Each handler receives a client that has already loaded the list, applies
//! one action, and prints the result.

use anyhow::{bail, Context, Result};

use todo_core::{SyncClient, Todo, TodoApi};

use crate::output::{Output, OutputFormat};

/// Print the current list
pub fn list<A: TodoApi>(client: &SyncClient<A>, output: &Output) -> Result<()> {
    output.print_snapshot(&client.snapshot());
    Ok(())
}

/// Add a todo from the given words
pub async fn add<A: TodoApi>(
    client: &mut SyncClient<A>,
    words: Vec<String>,
    output: &Output,
) -> Result<()> {
    client.set_input(words.join(" "));

    match client.submit_input().await.context("Failed to add todo")? {
        Some(todo) => {
            output.success("Added todo");
            print_outcome(client, Some(&todo), output);
        }
        None => output.message("Nothing to add."),
    }

    Ok(())
}

/// Flip the completion flag of a todo
pub async fn toggle<A: TodoApi>(
    client: &mut SyncClient<A>,
    id: String,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(client.todos(), &id)?;

    let Some(todo) = client
        .toggle_todo(&id)
        .await
        .context("Failed to toggle todo")?
    else {
        bail!("No todo found matching: {}", id);
    };

    let state = if todo.completed { "completed" } else { "reopened" };
    output.success(&format!("Marked todo {}", state));
    print_outcome(client, Some(&todo), output);

    Ok(())
}

/// Delete a todo
pub async fn delete<A: TodoApi>(
    client: &mut SyncClient<A>,
    id: String,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(client.todos(), &id)?;

    client
        .delete_todo(&id)
        .await
        .context("Failed to delete todo")?;

    output.success(&format!("Deleted todo: {}", id));
    print_outcome(client, None, output);
    Ok(())
}

/// Human output shows the whole list after an action; machine output only
/// the affected record.
fn print_outcome<A: TodoApi>(client: &SyncClient<A>, todo: Option<&Todo>, output: &Output) {
    match (output.format, todo) {
        (OutputFormat::Human, _) => {
            println!();
            output.print_snapshot(&client.snapshot());
        }
        (_, Some(todo)) => output.print_todo(todo),
        (_, None) => {}
    }
}

/// Resolve a todo id from a full id or unique prefix
fn resolve_id(todos: &[Todo], id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Todo ID must not be empty");
    }

    if todos.iter().any(|t| t.id == id) {
        return Ok(id.to_string());
    }

    let matches: Vec<&Todo> = todos.iter().filter(|t| t.id.starts_with(id)).collect();

    match matches.len() {
        0 => bail!("No todo found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple todos match '{}':", id);
            for todo in &matches {
                eprintln!("  {} - {}", todo.id, todo.text);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
