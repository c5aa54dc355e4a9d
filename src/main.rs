use std::sync::Arc;

use todo_summary::application::{summary::SummaryWorkflow, todo_service::TodoServiceImpl};
use todo_summary::config::Config;
use todo_summary::domain::collaborators::{ChatWebhook, TextGenerator};
use todo_summary::http::routing::{self, AppState};
use todo_summary::infrastructure::{gemini::GeminiClient, memory_repo::InMemoryTodoRepository, slack::SlackWebhook};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let generator: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => Some(Arc::new(GeminiClient::new(
            key.clone(),
            config.gemini_api_base.clone(),
            config.gemini_model.clone(),
            config.outbound_timeout,
        )?)),
        None => None,
    };
    let webhook: Option<Arc<dyn ChatWebhook>> = match &config.slack_webhook_url {
        Some(url) => Some(Arc::new(SlackWebhook::new(url.clone(), config.outbound_timeout)?)),
        None => None,
    };

    let service = TodoServiceImpl::new(InMemoryTodoRepository::new());
    let summary = SummaryWorkflow::new(service.clone(), generator, webhook);
    let router = routing::app(AppState { service, summary });

    let addr = config.addr();
    tracing::info!(
        gemini = if config.gemini_api_key.is_some() { "configured" } else { "missing" },
        slack = if config.slack_webhook_url.is_some() { "configured" } else { "missing" },
        model = %config.gemini_model,
        "environment check"
    );
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
