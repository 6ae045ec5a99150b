//! End-to-end tests: HTTP requests against a running server

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use taskstore::network::Server;
use taskstore::{Config, FileTaskStore};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

// =============================================================================
// Helper Functions
// =============================================================================

struct TestServer {
    _temp: TempDir,
    addr: SocketAddr,
    stop: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Self {
        let temp = TempDir::new().unwrap();
        let config = Config::builder()
            .data_file(temp.path().join("tasks.json"))
            .listen_addr("127.0.0.1:0")
            .build();
        let store = Arc::new(FileTaskStore::open(config.clone()).unwrap());

        let server = Server::bind(&config, store).await.unwrap();
        let addr = server.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .run_until(async move {
                    let _ = stopped.await;
                })
                .await
                .unwrap();
        });

        Self {
            _temp: temp,
            addr,
            stop: Some(stop),
            handle,
        }
    }

    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> (u16, String) {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        let body = body.unwrap_or("");
        let request = format!(
            "{method} {path} HTTP/1.1\r\n\
             Host: localhost\r\n\
             Connection: close\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             \r\n\
             {body}",
            body.len()
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8(raw).unwrap();

        let status = text[9..12].parse().unwrap();
        let body = text
            .split_once("\r\n\r\n")
            .map(|(_, b)| b.to_string())
            .unwrap_or_default();
        (status, body)
    }

    async fn json(&self, method: &str, path: &str, body: Option<Value>) -> (u16, Value) {
        let body = body.map(|b| b.to_string());
        let (status, text) = self.request(method, path, body.as_deref()).await;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, value)
    }

    async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.handle.await.unwrap();
    }
}

// =============================================================================
// CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_crud_lifecycle_over_http() {
    let server = TestServer::start().await;

    let (status, list) = server.json("GET", "/tasks", None).await;
    assert_eq!(status, 200);
    assert_eq!(list, json!([]));

    let (status, milk) = server
        .json("POST", "/tasks", Some(json!({ "title": "Buy milk", "done": false })))
        .await;
    assert_eq!(status, 201);
    assert_eq!(milk["id"], 1);
    assert_eq!(milk["title"], "Buy milk");
    assert_eq!(milk["done"], false);
    assert!(milk["createdAt"].is_string());

    let (status, dog) = server
        .json("POST", "/tasks", Some(json!({ "title": "Walk dog" })))
        .await;
    assert_eq!(status, 201);
    assert_eq!(dog["id"], 2);

    let (status, fetched) = server.json("GET", "/tasks/1", None).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, milk);

    let (status, updated) = server
        .json("PUT", "/tasks/1", Some(json!({ "title": "Buy oat milk", "done": true })))
        .await;
    assert_eq!(status, 200);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["title"], "Buy oat milk");
    assert_eq!(updated["done"], true);
    assert_eq!(updated["createdAt"], milk["createdAt"]);

    let (status, body) = server.request("DELETE", "/tasks/1", None).await;
    assert_eq!(status, 204);
    assert!(body.is_empty());

    let (status, _) = server.json("GET", "/tasks/1", None).await;
    assert_eq!(status, 404);

    let (status, list) = server.json("GET", "/tasks", None).await;
    assert_eq!(status, 200);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], 2);

    server.stop().await;
}

#[tokio::test]
async fn test_create_ignores_client_id_and_created_at() {
    let server = TestServer::start().await;

    let (status, created) = server
        .json(
            "POST",
            "/tasks",
            Some(json!({ "id": 500, "title": "x", "createdAt": "1999-01-01T00:00:00Z" })),
        )
        .await;

    assert_eq!(status, 201);
    assert_eq!(created["id"], 1);
    assert_ne!(created["createdAt"], "1999-01-01T00:00:00Z");

    server.stop().await;
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_blank_title_is_400_with_message() {
    let server = TestServer::start().await;

    let (status, body) = server
        .json("POST", "/tasks", Some(json!({ "title": "   ", "done": false })))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "title is required");

    let (status, body) = server.json("PUT", "/tasks/1", Some(json!({ "done": true }))).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "title is required");

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_requests_are_400() {
    let server = TestServer::start().await;

    let (status, body) = server.request("POST", "/tasks", Some("{ nope")).await;
    assert_eq!(status, 400);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["message"].is_string());

    let (status, _) = server.request("GET", "/tasks/abc", None).await;
    assert_eq!(status, 400);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let server = TestServer::start().await;

    let (status, _) = server
        .json("PUT", "/tasks/9", Some(json!({ "title": "x", "done": true })))
        .await;
    assert_eq!(status, 404);

    let (status, _) = server.request("DELETE", "/tasks/9", None).await;
    assert_eq!(status, 404);

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_posts_get_distinct_ids() {
    let server = Arc::new(TestServer::start().await);

    let mut handles = Vec::new();
    for i in 0..16 {
        let server = Arc::clone(&server);
        handles.push(tokio::spawn(async move {
            let (status, task) = server
                .json("POST", "/tasks", Some(json!({ "title": format!("task {i}") })))
                .await;
            assert_eq!(status, 201);
            task["id"].as_i64().unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=16).collect::<Vec<_>>());

    let (_, list) = server.json("GET", "/tasks", None).await;
    assert_eq!(list.as_array().unwrap().len(), 16);

    if let Ok(server) = Arc::try_unwrap(server) {
        server.stop().await;
    }
}
