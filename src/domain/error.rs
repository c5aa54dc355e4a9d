use thiserror::Error;

use super::todo::TodoId;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("{0}")]
    Validation(String),
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl TodoError {
    pub fn empty_text() -> Self { TodoError::Validation("Text is required".into()) }
}
