//! Todo REST server

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_core::{Config, TodoStore};
use todo_server::{create_router, AppState};

#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo REST service")]
#[command(version)]
struct Args {
    /// Listen address (overrides listen_addr / TODO_LISTEN_ADDR)
    #[arg(short, long)]
    listen: Option<String>,

    /// Data directory for the SQLite database (overrides data_dir / TODO_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Keep todos in memory only; nothing is written to disk
    #[arg(long)]
    memory: bool,

    /// Config file to load instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_server=info,todo_core=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let store = if args.memory {
        info!("Using in-memory store");
        TodoStore::open_in_memory()?
    } else {
        info!("Using database {:?}", config.database_path());
        TodoStore::open_with_config(&config).context("Failed to open todo store")?
    };

    let app = create_router(Arc::new(AppState::new(store)));

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("todo-server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("todo-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
