//! Helpers for driving the router in handler tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use super::routes;
use crate::state::AppState;
use crate::store::{MemoryTaskStore, StoreError, TaskFilter, TaskStore};
use crate::tasks::{NewTask, Task};

pub fn app_with(store: Arc<dyn TaskStore>) -> Router {
    routes().with_state(AppState::new(store))
}

pub fn app() -> Router {
    app_with(Arc::new(MemoryTaskStore::new()))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Response) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    (response.status(), response)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_is_empty(response: Response) -> bool {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .is_empty()
}

/// Store where every call fails, as if the database were down.
pub struct BrokenStore;

#[async_trait]
impl TaskStore for BrokenStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn find_by_id(&self, _id: i32) -> Result<Option<Task>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn filter(&self, _filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn insert(&self, _task: NewTask) -> Result<Task, StoreError> {
        Err(StoreError::Unavailable("unique constraint violated".into()))
    }
    async fn update(&self, _task: Task) -> Result<Option<Task>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
    async fn delete(&self, _id: i32) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}
