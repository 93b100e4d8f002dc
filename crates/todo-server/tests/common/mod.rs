//! Shared test utilities for todo-server integration tests.

#![allow(dead_code)]

use reqwest::{Client, Response};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use todo_core::sync::SharedStore;
use todo_core::TodoStore;
use todo_server::{create_router, AppState};

/// Test server wrapper running the REST API over an in-memory store.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: SharedStore,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    /// Spawn a server with an empty in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(TodoStore::open_in_memory().expect("Failed to open store")).await
    }

    /// Spawn a server over the given store.
    pub async fn spawn_with_store(store: TodoStore) -> Self {
        let app_state = Arc::new(AppState::new(store));
        let store = app_state.store.clone();
        let router = create_router(app_state);

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        Self {
            addr,
            client: Client::new(),
            store,
            shutdown_tx,
        }
    }

    /// Get base URL for the REST API.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Perform a GET request.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a POST request with JSON body.
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Response {
        self.client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a PATCH request with JSON body.
    pub async fn patch_json<T: Serialize>(&self, path: &str, body: &T) -> Response {
        self.client
            .patch(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a DELETE request.
    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Stop the server.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}
