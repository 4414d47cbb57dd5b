//! Todo backend API
//!
//! HTTP access to the external todo service.
//!
//! # Endpoints
//!
//! All paths are relative to the configured base URL (e.g. `/api/todos`):
//! - `GET /` - List all todos
//! - `GET /health` - Status plus a fixed sample set of todos
//! - `POST /` - Create a todo from `{title}`
//! - `PUT /{id}` - Replace title and done flag
//! - `DELETE /{id}` - Remove a todo
//!
//! The [`TodoApi`] trait is the seam between the view and the network.
//! [`TodoClient`] is the reqwest implementation.

mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use client::{normalize_base_url, TodoClient};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::todo::{HealthResponse, NewTodo, Todo, TodoId, TodoUpdate};

/// Operations offered by the todo backend
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// Base URL every request is built from
    fn base_url(&self) -> &str;

    /// Fetch the full list. An OK response that is not a JSON array
    /// yields an empty list.
    async fn list(&self) -> ApiResult<Vec<Todo>>;

    /// Fetch the health endpoint with its sample todos
    async fn health(&self) -> ApiResult<HealthResponse>;

    /// Create a todo and return the backend's copy
    async fn create(&self, todo: &NewTodo) -> ApiResult<Todo>;

    /// Update a todo and return the backend's copy
    async fn update(&self, id: &TodoId, update: &TodoUpdate) -> ApiResult<Todo>;

    /// Delete a todo. Any 2xx counts as success.
    async fn delete(&self, id: &TodoId) -> ApiResult<()>;
}
