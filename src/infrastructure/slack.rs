use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::domain::{
    collaborators::{ChatWebhook, WebhookError},
    summary::ChatMessage,
};

/// Slack incoming-webhook sink.
pub struct SlackWebhook {
    http_client: Client,
    url: String,
}

impl SlackWebhook {
    pub fn new(url: String, timeout: Duration) -> Result<Self, WebhookError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .map_err(|e| WebhookError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http_client, url })
    }
}

#[async_trait]
impl ChatWebhook for SlackWebhook {
    async fn dispatch(&self, message: &ChatMessage) -> Result<(), WebhookError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|e| classify(e, &self.url))?;

        let status = response.status();
        if status.is_success() { return Ok(()); }
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(WebhookError::InvalidEndpoint(format!("{} returned 404: {}", host_of(&self.url), body)));
        }
        Err(WebhookError::Http { status: status.as_u16(), body })
    }
}

// Unparseable, unresolvable or unreachable URLs are configuration mistakes.
// The webhook path is a secret, so errors only ever name the host.
fn classify(err: reqwest::Error, url: &str) -> WebhookError {
    let err = err.without_url();
    if err.is_timeout() {
        WebhookError::Timeout
    } else if err.is_builder() || err.is_connect() {
        WebhookError::InvalidEndpoint(format!("{}: {}", host_of(url), err))
    } else {
        WebhookError::Transport(err.to_string())
    }
}

fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "<unparseable url>".to_string())
}
