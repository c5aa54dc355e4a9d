//! Typed HTTP client for the todo API, used by the terminal front-end.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::application::summary::SummaryReport;
use crate::domain::todo::{Todo, TodoId, UpdateTodo};
use crate::http::types::HealthEnvironment;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("server did not answer in time")]
    Timeout,
    #[error("cannot reach server: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ClientError::Timeout } else { ClientError::Transport(err) }
    }
}

/// Covers `/summarize`, which waits on two outbound calls server-side.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(75);

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub environment: HealthEnvironment,
}

#[derive(Debug, Deserialize)]
struct Deleted {
    #[serde(rename = "deletedTodo")]
    deleted_todo: Todo,
}

#[derive(Debug, Deserialize)]
struct Report {
    message: String,
    summary: String,
    #[serde(rename = "todoCount")]
    todo_count: usize,
}

// Todo routes reply with `error`, the summary route with `message`.
#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base: base.into().trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String { format!("{}{}", self.base, path) }

    pub async fn health(&self) -> Result<Health, ClientError> {
        decode(self.http.get(self.url("/health")).send().await?).await
    }

    pub async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        decode(self.http.get(self.url("/todos")).send().await?).await
    }

    pub async fn create(&self, text: &str) -> Result<Todo, ClientError> {
        let body = serde_json::json!({ "text": text });
        decode(self.http.post(self.url("/todos")).json(&body).send().await?).await
    }

    pub async fn update(&self, id: TodoId, patch: &UpdateTodo) -> Result<Todo, ClientError> {
        decode(self.http.put(self.url(&format!("/todos/{}", id))).json(patch).send().await?).await
    }

    pub async fn delete(&self, id: TodoId) -> Result<Todo, ClientError> {
        let deleted: Deleted = decode(self.http.delete(self.url(&format!("/todos/{}", id))).send().await?).await?;
        Ok(deleted.deleted_todo)
    }

    pub async fn summarize(&self) -> Result<SummaryReport, ClientError> {
        let report: Report = decode(self.http.post(self.url("/summarize")).send().await?).await?;
        Ok(SummaryReport { success: true, message: report.message, summary: report.summary, todo_count: report.todo_count })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body: FailureBody = response.json().await.unwrap_or_default();
    let message = body
        .error
        .or(body.message)
        .unwrap_or_else(|| format!("request failed with status {}", status));
    Err(ClientError::Api { status: status.as_u16(), message })
}
