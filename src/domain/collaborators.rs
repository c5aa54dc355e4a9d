use async_trait::async_trait;
use thiserror::Error;

use super::summary::ChatMessage;

#[derive(Debug, Error)]
pub enum TextGenError {
    #[error("text generation credential rejected")]
    InvalidCredential,
    #[error("text generation timed out")]
    Timeout,
    #[error("text generation failed (status {status}): {body}")]
    Http { status: u16, body: String },
    #[error("text generation returned no text")]
    EmptyResponse,
    #[error("text generation transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("webhook endpoint is invalid: {0}")]
    InvalidEndpoint(String),
    #[error("webhook request timed out")]
    Timeout,
    #[error("webhook rejected message (status {status}): {body}")]
    Http { status: u16, body: String },
    #[error("webhook transport error: {0}")]
    Transport(String),
}

/// Generative-text provider: prompt in, completion out.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenError>;
}

/// Chat sink that accepts a structured message.
#[async_trait]
pub trait ChatWebhook: Send + Sync + 'static {
    async fn dispatch(&self, message: &ChatMessage) -> Result<(), WebhookError>;
}
