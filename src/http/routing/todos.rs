use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{extract::{Path, State}, routing::get, Router, Json};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use super::AppState;
use crate::{application::todo_service::TodoService, domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo}};
use crate::http::types::{ApiError, DeletedBody};

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/todos/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

/// `text` is optional here so a missing field reports the same 400 as a blank one.
#[derive(Deserialize)]
struct CreateBody { text: Option<String> }

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, payload: Result<Json<CreateBody>, JsonRejection>) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let todo = state.service.create(CreateTodo { text: body.text.unwrap_or_default() }).await?;
    tracing::info!(id = %todo.id, "todo added");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, path: Result<Path<u64>, PathRejection>) -> Result<Json<Todo>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.service.get(TodoId(id)).await?))
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, path: Result<Path<u64>, PathRejection>, payload: Result<Json<UpdateTodo>, JsonRejection>) -> Result<Json<Todo>, ApiError> {
    let Path(id) = path?;
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            // Unknown ids report 404 even when the body is missing or malformed.
            state.service.get(TodoId(id)).await?;
            return Err(rejection.into());
        }
    };
    let todo = state.service.update(TodoId(id), patch).await?;
    tracing::info!(id = %todo.id, completed = todo.completed, "todo updated");
    Ok(Json(todo))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, path: Result<Path<u64>, PathRejection>) -> Result<Json<DeletedBody>, ApiError> {
    let Path(id) = path?;
    let deleted = state.service.delete(TodoId(id)).await?;
    tracing::info!(id = %deleted.id, "todo deleted");
    Ok(Json(DeletedBody { success: true, deleted_todo: deleted }))
}
