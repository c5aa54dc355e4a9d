pub mod summary;
pub mod todos;

use axum::{extract::State, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;

use crate::application::{summary::SummaryWorkflow, todo_service::TodoService};
use crate::http::middleware::{cors, log_requests};
use crate::http::types::{ApiError, HealthBody, HealthEnvironment};

#[derive(Clone)]
pub struct AppState<S: TodoService> {
    pub service: S,
    pub summary: SummaryWorkflow<S>,
}

pub fn app<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health::<S>).with_state(state.clone()))
        .merge(todos::router(state.clone()))
        .merge(summary::router(state))
        .layer(ServiceBuilder::new().layer(middleware::from_fn(log_requests)).layer(middleware::from_fn(cors)))
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Todo Summary Assistant API is running!",
        "endpoints": {
            "GET /health": "Service health and configuration",
            "GET /todos": "Get all todos",
            "GET /todos/:id": "Get one todo",
            "POST /todos": "Add new todo",
            "PUT /todos/:id": "Update todo",
            "DELETE /todos/:id": "Delete todo",
            "POST /summarize": "Summarize and send to Slack"
        }
    }))
}

async fn health<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<HealthBody>, ApiError> {
    let todo_count = state.service.count().await?;
    Ok(Json(HealthBody {
        status: "healthy".into(),
        timestamp: chrono::Utc::now(),
        environment: HealthEnvironment {
            gemini_configured: state.summary.text_gen_configured(),
            slack_configured: state.summary.webhook_configured(),
            todo_count,
        },
    }))
}
