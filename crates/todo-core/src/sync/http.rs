//! HTTP transport for the todo service
//!
//! | Call   | Request                                   | Success  |
//! |--------|-------------------------------------------|----------|
//! | list   | `GET /todos`                              | 200      |
//! | create | `POST /todos` `{"text": ..}`              | 200, 201 |
//! | update | `PATCH /todos/{id}` `{"completed": ..}`   | 200      |
//! | delete | `DELETE /todos/{id}`                      | 200, 204 |
//!
//! 400 maps to `ApiError::Validation`, 404 on an id route to
//! `ApiError::NotFound`; any other non-success status is `ApiError::Status`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use tracing::debug;

use super::api::TodoApi;
use super::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::models::{CreateTodo, ErrorResponse, Todo, UpdateTodo};

/// `TodoApi` over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    base_url: Url,
}

impl HttpTodoApi {
    /// Create a client for the service at `base_url`, without a timeout
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client from configuration (`api_url`, `request_timeout_secs`)
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::with_timeout(config.api_base(), config.request_timeout())
    }

    /// Create a client with an optional per-request timeout
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(trimmed.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn collection_url(&self) -> Url {
        self.url_with(&["todos"])
    }

    /// Item URL; the id is percent-encoded as a single path segment
    fn item_url(&self, id: &str) -> Url {
        self.url_with(&["todos", id])
    }

    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Base URLs are checked in the constructor, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> ApiResult<Vec<Todo>> {
        debug!("GET {}", self.collection_url());
        let response = self.client.get(self.collection_url()).send().await?;
        let response = check_status(response, None).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, text: &str) -> ApiResult<Todo> {
        debug!("POST {}", self.collection_url());
        let body = CreateTodo {
            text: text.to_string(),
        };
        let response = self
            .client
            .post(self.collection_url())
            .json(&body)
            .send()
            .await?;
        let response = check_status(response, None).await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, completed: bool) -> ApiResult<Todo> {
        let url = self.item_url(id);
        debug!("PATCH {}", url);
        let response = self
            .client
            .patch(url)
            .json(&UpdateTodo { completed })
            .send()
            .await?;
        let response = check_status(response, Some(id)).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        check_status(response, Some(id)).await?;
        Ok(())
    }
}

/// Turn a non-success response into the matching `ApiError`
///
/// `id` is set for item routes; only there does 404 mean an unknown todo.
async fn check_status(response: Response, id: Option<&str>) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(match (status, id) {
        (StatusCode::BAD_REQUEST, _) => ApiError::Validation(message),
        (StatusCode::NOT_FOUND, Some(id)) => ApiError::NotFound(id.to_string()),
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    })
}
