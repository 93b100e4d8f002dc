//! Todo CLI
//!
//! Command-line front end for the todo service. Every command loads the
//! list from the server, applies one action, and prints the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use todo_core::{Config, HttpTodoApi, SyncClient};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Todo - manage a shared todo list")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file to load instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all todos
    #[command(alias = "ls")]
    List,
    /// Add a todo
    Add {
        /// Todo text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Toggle a todo between open and completed
    Toggle {
        /// Todo ID (or unique prefix)
        id: String,
    },
    /// Delete a todo
    #[command(alias = "rm")]
    Delete {
        /// Todo ID (or unique prefix)
        id: String,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config_path = cli.config.clone().unwrap_or_else(Config::config_file_path);
    let config = Config::load_from_path(&config_path)?;

    if let Commands::Config = cli.command {
        commands::config::show(&config, &config_path, &output);
        return Ok(());
    }

    let api = HttpTodoApi::from_config(&config).context("Failed to build HTTP client")?;
    let mut client = SyncClient::new(api);
    debug!("Using todo service at {}", client.api().base_url());

    if let Err(e) = client.initialize().await {
        let hint = if e.is_transport() {
            format!("Todo service at {} is unavailable", client.api().base_url())
        } else {
            "Failed to load todos".to_string()
        };
        return Err(anyhow::Error::new(e).context(hint));
    }

    match cli.command {
        Commands::List => commands::todo::list(&client, &output),
        Commands::Add { text } => commands::todo::add(&mut client, text, &output).await,
        Commands::Toggle { id } => commands::todo::toggle(&mut client, id, &output).await,
        Commands::Delete { id } => commands::todo::delete(&mut client, id, &output).await,
        Commands::Config => Ok(()),
    }
}

/// Install a stderr subscriber when TODO_LOG is set, so stdout stays clean
fn init_logging() {
    let Ok(log_level) = std::env::var("TODO_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!("todo_core={},todo_cli={}", log_level, log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
