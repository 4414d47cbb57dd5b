//! In-process fake todo backend for tests
//!
//! Serves the same routes as the real service from an in-memory list and
//! records every request it receives.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::todo::{NewTodo, Todo, TodoUpdate};

/// A request as seen by the fake backend
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct Shared {
    todos: Arc<Mutex<Vec<Todo>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Shared {
    fn record(&self, method: Method, path: String, body: Option<Value>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path,
            body,
        });
    }
}

/// Running fake backend
pub(crate) struct FakeBackend {
    pub base_url: String,
    shared: Shared,
}

impl FakeBackend {
    /// Start serving `initial` on an ephemeral local port
    pub async fn start(initial: Vec<Todo>) -> Self {
        let shared = Shared::default();
        *shared.todos.lock().unwrap() = initial;

        let router = Router::new()
            .route("/api/todos", get(list).post(create))
            .route("/api/todos/health", get(health))
            .route("/api/todos/:id", put(update).delete(delete))
            .with_state(shared.clone());

        let base_url = spawn_router(router).await;
        Self { base_url, shared }
    }

    /// The fixed set served by the health endpoint
    pub fn sample_todos() -> Vec<Todo> {
        vec![
            Todo::new("sample-1", "Sample todo 1"),
            Todo::new("sample-2", "Sample todo 2").done(true),
        ]
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.shared.todos.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }
}

/// Serve an arbitrary router and return its `/api/todos` base URL
pub(crate) async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/todos", addr)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))).into_response()
}

async fn list(State(shared): State<Shared>) -> Json<Vec<Todo>> {
    shared.record(Method::GET, "/api/todos".to_string(), None);
    Json(shared.todos.lock().unwrap().clone())
}

async fn health(State(shared): State<Shared>) -> Json<Value> {
    shared.record(Method::GET, "/api/todos/health".to_string(), None);
    Json(json!({"status": "ok", "todos": FakeBackend::sample_todos()}))
}

async fn create(State(shared): State<Shared>, Json(body): Json<NewTodo>) -> Response {
    shared.record(Method::POST, "/api/todos".to_string(), Some(json!(body)));

    let todo = Todo::new(Uuid::new_v4().simple().to_string(), body.title);
    shared.todos.lock().unwrap().insert(0, todo.clone());
    (StatusCode::CREATED, Json(todo)).into_response()
}

async fn update(
    State(shared): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<TodoUpdate>,
) -> Response {
    shared.record(Method::PUT, format!("/api/todos/{}", id), Some(json!(body)));

    let mut todos = shared.todos.lock().unwrap();
    match todos.iter_mut().find(|t| t.id.to_string() == id) {
        Some(todo) => {
            todo.title = body.title;
            todo.done = body.done;
            Json(todo.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete(State(shared): State<Shared>, Path(id): Path<String>) -> Response {
    shared.record(Method::DELETE, format!("/api/todos/{}", id), None);

    let mut todos = shared.todos.lock().unwrap();
    let before = todos.len();
    todos.retain(|t| t.id.to_string() != id);
    if todos.len() == before {
        not_found()
    } else {
        Json(json!({"deleted": true})).into_response()
    }
}
