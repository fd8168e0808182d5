#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use clearcare_api::config::ServerConfig;
use clearcare_api::router::build_app_router;
use clearcare_api::state::AppState;
use clearcare_core::completion::{ChatMessage, TextCompletion, TransientError};
use clearcare_core::conversation::{Conversation, ConversationDraft, ConversationPatch};
use clearcare_core::store::{MemoryStore, RecordStore, StoreError};
use clearcare_core::types::DbId;

/// Test `ServerConfig`: dev CORS origin, 30-second timeout, no database.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Completion that replies with a fixed result and records every call.
pub struct FakeCompletion {
    reply: Result<String, TransientError>,
    pub calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(TransientError::Unavailable("connection reset".into())),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextCompletion for FakeCompletion {
    async fn complete(
        &self,
        system_instruction: &str,
        history: &[ChatMessage],
    ) -> Result<String, TransientError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_instruction.to_string(), history.to_vec()));
        self.reply.clone()
    }
}

/// Store that is always unreachable.
pub struct DownStore;

#[async_trait]
impl RecordStore for DownStore {
    async fn create(&self, _: &ConversationDraft) -> Result<Conversation, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn update(&self, _: DbId, _: &ConversationPatch) -> Result<Conversation, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn get(&self, _: DbId) -> Result<Option<Conversation>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build the full application router over the given collaborators.
pub fn build_test_app(store: Arc<dyn RecordStore>, completion: Arc<dyn TextCompletion>) -> Router {
    build_app_router(AppState::new(store, completion, test_config()))
}

/// In-memory store and a completion that always answers `"Hello."`.
pub fn default_app() -> Router {
    build_test_app(Arc::new(MemoryStore::new()), FakeCompletion::replying("Hello."))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::PATCH, uri, body).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the JSON body.
pub async fn expect_json(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
