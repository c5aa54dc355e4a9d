//! Summarize-and-dispatch workflow: todos → prompt → text generation →
//! chat message → webhook.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use crate::application::todo_service::TodoService;
use crate::domain::{
    collaborators::{ChatWebhook, TextGenError, TextGenerator, WebhookError},
    error::TodoError,
    summary::{build_prompt, ChatMessage},
};

pub const SUCCESS_MESSAGE: &str = "✅ Summary generated and sent to Slack successfully!";

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("no todos to summarize")]
    NoTodos,
    #[error("text generation credential is not configured")]
    MissingTextGenCredential,
    #[error("webhook URL is not configured")]
    MissingWebhookUrl,
    #[error(transparent)]
    TextGen(TextGenError),
    #[error(transparent)]
    WebhookConfig(WebhookError),
    #[error(transparent)]
    Webhook(WebhookError),
    #[error("reading todos failed: {0}")]
    Store(#[from] TodoError),
}

impl SummaryError {
    /// User-facing message, distinct per cause.
    pub fn user_message(&self) -> &'static str {
        match self {
            SummaryError::NoTodos => "❌ No todos to summarize",
            SummaryError::MissingTextGenCredential => "❌ Gemini API key not configured",
            SummaryError::MissingWebhookUrl => "❌ Slack webhook URL not configured",
            SummaryError::TextGen(TextGenError::InvalidCredential) => "❌ Invalid Gemini API key",
            SummaryError::TextGen(TextGenError::Timeout) => "❌ Gemini request timed out",
            SummaryError::TextGen(_) => "❌ Failed to generate summary with Gemini. Check server logs.",
            SummaryError::WebhookConfig(_) => "❌ Invalid Slack webhook URL",
            SummaryError::Webhook(WebhookError::Timeout) => "❌ Slack webhook request timed out",
            SummaryError::Webhook(_) => "❌ Failed to send summary to Slack. Check server logs.",
            SummaryError::Store(_) => "❌ Failed to generate summary or send to Slack. Check server logs.",
        }
    }

    pub fn is_client_error(&self) -> bool { matches!(self, SummaryError::NoTodos) }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub success: bool,
    pub message: String,
    pub summary: String,
    pub todo_count: usize,
}

/// Collaborators are optional: an absent one means its configuration is
/// missing, which is reported before any outbound call is made.
pub struct SummaryWorkflow<S: TodoService> {
    service: S,
    generator: Option<Arc<dyn TextGenerator>>,
    webhook: Option<Arc<dyn ChatWebhook>>,
}

impl<S: TodoService + Clone> Clone for SummaryWorkflow<S> {
    fn clone(&self) -> Self {
        Self { service: self.service.clone(), generator: self.generator.clone(), webhook: self.webhook.clone() }
    }
}

impl<S: TodoService> SummaryWorkflow<S> {
    pub fn new(service: S, generator: Option<Arc<dyn TextGenerator>>, webhook: Option<Arc<dyn ChatWebhook>>) -> Self {
        Self { service, generator, webhook }
    }

    pub fn text_gen_configured(&self) -> bool { self.generator.is_some() }

    pub fn webhook_configured(&self) -> bool { self.webhook.is_some() }

    pub async fn summarize_and_dispatch(&self) -> Result<SummaryReport, SummaryError> {
        let todos = self.service.list().await?;
        if todos.is_empty() {
            return Err(SummaryError::NoTodos);
        }
        let generator = self.generator.as_ref().ok_or(SummaryError::MissingTextGenCredential)?;
        let webhook = self.webhook.as_ref().ok_or(SummaryError::MissingWebhookUrl)?;

        let prompt = build_prompt(&todos);
        tracing::info!(todo_count = todos.len(), "requesting summary");
        let summary = generator.generate(&prompt).await.map_err(SummaryError::TextGen)?;

        let message = ChatMessage::summary_report(&summary, todos.len(), Utc::now());
        webhook.dispatch(&message).await.map_err(|e| match e {
            WebhookError::InvalidEndpoint(_) => SummaryError::WebhookConfig(e),
            other => SummaryError::Webhook(other),
        })?;
        tracing::info!(todo_count = todos.len(), "summary dispatched");

        Ok(SummaryReport {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            summary,
            todo_count: todos.len(),
        })
    }
}
