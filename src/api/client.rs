//! Todo REST API Client
//!
//! HTTP client for the todo backend's JSON API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::TodoApi;
use crate::todo::{HealthResponse, NewTodo, Todo, TodoId, TodoUpdate};

/// Longest slice of an error body kept in `ApiError::Status`
const MAX_ERROR_BODY: usize = 200;

/// Todo backend REST API client
pub struct TodoClient {
    client: Client,
    base_url: String,
}

impl TodoClient {
    /// Create a new client for the given base URL (e.g. "http://127.0.0.1:5000/api/todos")
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("todos/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    fn item_url(&self, id: &TodoId) -> String {
        format!("{}/{}", self.base_url, id.path_segment())
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// Send a request, turning non-2xx statuses into `ApiError::Status`
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = request.build()?;
        let span = tracing::debug_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            url = %request.url()
        );

        async move {
            tracing::debug!("Sending request");
            let response = self.client.execute(request).await?;
            let status = response.status();

            if status.is_success() {
                tracing::debug!(status = status.as_u16(), "Request succeeded");
                Ok(response)
            } else {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::Status {
                    status: status.as_u16(),
                    message: truncate(&text, MAX_ERROR_BODY).to_string(),
                })
            }
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl TodoApi for TodoClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list(&self) -> ApiResult<Vec<Todo>> {
        let response = self.send(self.client.get(&self.base_url)).await?;
        let body = read_json(response).await?;

        if body.is_array() {
            Ok(serde_json::from_value(body)?)
        } else {
            tracing::debug!("List response is not an array, treating as empty");
            Ok(Vec::new())
        }
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        let response = self.send(self.client.get(self.health_url())).await?;
        let body = read_json(response).await?;

        if body.is_object() {
            Ok(serde_json::from_value(body)?)
        } else {
            Ok(HealthResponse::default())
        }
    }

    async fn create(&self, todo: &NewTodo) -> ApiResult<Todo> {
        let response = self
            .send(self.client.post(&self.base_url).json(todo))
            .await?;

        Ok(serde_json::from_value(read_json(response).await?)?)
    }

    async fn update(&self, id: &TodoId, update: &TodoUpdate) -> ApiResult<Todo> {
        let response = self
            .send(self.client.put(self.item_url(id)).json(update))
            .await?;

        Ok(serde_json::from_value(read_json(response).await?)?)
    }

    async fn delete(&self, id: &TodoId) -> ApiResult<()> {
        self.send(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }
}

/// Strip trailing slashes so paths can be appended with a single `/`
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

async fn read_json(response: Response) -> ApiResult<Value> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
