//! End-to-end tests: `SyncClient` over `HttpTodoApi` against a live server.

mod common;

use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

use todo_core::{ApiError, HttpTodoApi, SyncClient, Todo, TodoApi};

async fn client_for(server: &common::TestServer) -> SyncClient<HttpTodoApi> {
    let api = HttpTodoApi::new(&server.base_url()).unwrap();
    let mut client = SyncClient::new(api);
    client.initialize().await.unwrap();
    client
}

fn contents(todos: &[Todo]) -> Vec<(String, String, bool)> {
    todos
        .iter()
        .map(|t| (t.id.clone(), t.text.clone(), t.completed))
        .collect()
}

#[tokio::test]
async fn test_add_to_empty_store() {
    let server = common::TestServer::spawn().await;
    let mut client = client_for(&server).await;

    client.set_input("buy milk");
    let created = client.submit_input().await.unwrap().unwrap();

    let todos = client.todos();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "buy milk");
    assert!(!todos[0].completed);
    assert_eq!(todos[0].id, created.id);
    assert!(!created.id.is_empty());
    assert_eq!(client.input(), "");

    server.shutdown().await;
}

#[tokio::test]
async fn test_toggle_round_trip() {
    let server = common::TestServer::spawn().await;
    let seeded = server.store.lock().await.create("seeded").unwrap();
    let mut client = client_for(&server).await;

    client.toggle_todo(&seeded.id).await.unwrap();
    assert!(client.get(&seeded.id).unwrap().completed);

    client.toggle_todo(&seeded.id).await.unwrap();
    assert!(!client.get(&seeded.id).unwrap().completed);

    let stored = server.store.lock().await.get(&seeded.id).unwrap().unwrap();
    assert!(!stored.completed);

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_first_of_two() {
    let server = common::TestServer::spawn().await;
    let (a, b) = {
        let mut store = server.store.lock().await;
        (store.create("a").unwrap(), store.create("b").unwrap())
    };
    let mut client = client_for(&server).await;
    assert_eq!(client.todos().len(), 2);

    client.delete_todo(&a.id).await.unwrap();

    assert_eq!(client.todos().len(), 1);
    assert_eq!(client.todos()[0].id, b.id);

    server.shutdown().await;
}

#[tokio::test]
async fn test_blank_add_is_ignored() {
    let server = common::TestServer::spawn().await;
    let mut client = client_for(&server).await;

    assert!(client.add_todo("").await.unwrap().is_none());
    assert!(client.add_todo("   ").await.unwrap().is_none());

    assert!(client.todos().is_empty());
    assert_eq!(server.store.lock().await.count().unwrap(), 0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_local_list_matches_server_after_actions() {
    let server = common::TestServer::spawn().await;
    let mut client = client_for(&server).await;

    let a = client.add_todo("a").await.unwrap().unwrap();
    client.add_todo("b").await.unwrap();
    let c = client.add_todo("c").await.unwrap().unwrap();
    client.toggle_todo(&c.id).await.unwrap();
    client.delete_todo(&a.id).await.unwrap();

    let server_list = server.store.lock().await.list().unwrap();
    assert_eq!(contents(client.todos()), contents(&server_list));

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_unknown_id_reports_not_found() {
    let server = common::TestServer::spawn().await;
    let seeded = server.store.lock().await.create("x").unwrap();
    let mut client = client_for(&server).await;

    // Removed behind the client's back
    server.store.lock().await.delete(&seeded.id).unwrap();

    let before = contents(client.todos());
    let err = client.delete_todo(&seeded.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(contents(client.todos()), before);

    let err = client.toggle_todo(&seeded.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(contents(client.todos()), before);

    server.shutdown().await;
}

#[tokio::test]
async fn test_failures_leave_state_unchanged_when_server_is_gone() {
    let server = common::TestServer::spawn().await;
    let seeded = server.store.lock().await.create("kept").unwrap();

    let api = HttpTodoApi::with_timeout(&server.base_url(), Some(Duration::from_secs(2))).unwrap();
    let mut client = SyncClient::new(api);
    client.initialize().await.unwrap();
    client.set_input("typed");

    server.shutdown().await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let before = contents(client.todos());

    assert!(matches!(
        client.submit_input().await.unwrap_err(),
        ApiError::Transport(_)
    ));
    assert!(client.toggle_todo(&seeded.id).await.is_err());
    assert!(client.delete_todo(&seeded.id).await.is_err());

    assert_eq!(contents(client.todos()), before);
    assert_eq!(client.input(), "typed");
    assert!(client.last_error().is_some());
}

#[tokio::test]
async fn test_initialize_against_unreachable_server() {
    let server = common::TestServer::spawn().await;
    let base_url = server.base_url();
    server.shutdown().await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let api = HttpTodoApi::with_timeout(&base_url, Some(Duration::from_secs(2))).unwrap();
    let mut client = SyncClient::new(api);

    assert!(client.initialize().await.is_err());
    assert!(client.todos().is_empty());
}

// =============================================================================
// Status mapping
// =============================================================================

/// Serve `/todos` answering every request with `status` and a plain body.
async fn spawn_status_service(status: StatusCode) -> String {
    let router = Router::new().route(
        "/todos",
        get(move || async move { (status, "service down") })
            .post(move || async move { (status, "service down") }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_blank_create_maps_to_validation() {
    let server = common::TestServer::spawn().await;
    let api = HttpTodoApi::new(&server.base_url()).unwrap();

    match api.create("   ").await.unwrap_err() {
        ApiError::Validation(message) => assert!(message.contains("empty")),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(server.store.lock().await.count().unwrap(), 0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_collection_404_maps_to_status() {
    let server = common::TestServer::spawn().await;
    let api = HttpTodoApi::new(&format!("{}/missing", server.base_url())).unwrap();

    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert!(!err.is_not_found());

    server.shutdown().await;
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let base_url = spawn_status_service(StatusCode::SERVICE_UNAVAILABLE).await;
    let api = HttpTodoApi::new(&base_url).unwrap();

    assert!(matches!(
        api.list().await.unwrap_err(),
        ApiError::Status { status: 503, .. }
    ));

    let mut client = SyncClient::new(api);
    let err = client.add_todo("buy milk").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 503, .. }));
    assert!(err.is_transport());
    assert!(client.todos().is_empty());
}

#[tokio::test]
async fn test_id_is_sent_as_one_path_segment() {
    let server = common::TestServer::spawn().await;
    let seeded = server.store.lock().await.create("untouched").unwrap();
    let api = HttpTodoApi::new(&server.base_url()).unwrap();

    let crafted = format!("{}?completed=true", seeded.id);
    match api.update(&crafted, true).await.unwrap_err() {
        ApiError::NotFound(id) => assert_eq!(id, crafted),
        other => panic!("expected not found, got {:?}", other),
    }

    let nested = format!("{}/extra", seeded.id);
    assert!(api.delete(&nested).await.unwrap_err().is_not_found());

    let stored = server.store.lock().await.get(&seeded.id).unwrap().unwrap();
    assert!(!stored.completed);
    assert_eq!(server.store.lock().await.count().unwrap(), 1);

    server.shutdown().await;
}
