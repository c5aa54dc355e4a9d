use axum::{extract::State, routing::post, Json, Router};

use super::AppState;
use crate::application::{summary::SummaryReport, todo_service::TodoService};
use crate::http::types::ApiError;

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/summarize", post(summarize::<S>))
        .with_state(state)
}

async fn summarize<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<SummaryReport>, ApiError> {
    Ok(Json(state.summary.summarize_and_dispatch().await?))
}
