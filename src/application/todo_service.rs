use crate::domain::error::TodoError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, TodoError>;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> Result<Todo>;
    async fn get(&self, id: TodoId) -> Result<Todo>;
    async fn list(&self) -> Result<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo>;
    async fn delete(&self, id: TodoId) -> Result<Todo>;
    async fn count(&self) -> Result<usize>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

fn normalize(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let text = normalize(&input.text).ok_or_else(TodoError::empty_text)?;
        let todo = self.repo.create(CreateTodo { text }).await?;
        tracing::debug!(id = %todo.id, "todo created");
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Todo> {
        self.repo.get(id).await?.ok_or(TodoError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<Todo>> { Ok(self.repo.list().await?) }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Todo> {
        let text = match input.text {
            Some(raw) => match normalize(&raw) {
                Some(text) => Some(text),
                None => {
                    // Unknown ids report not-found ahead of bad input.
                    self.get(id).await?;
                    return Err(TodoError::empty_text());
                }
            },
            None => None,
        };
        let updated = self.repo.update(id, UpdateTodo { text, completed: input.completed }).await?;
        let todo = updated.ok_or(TodoError::NotFound(id))?;
        tracing::debug!(id = %todo.id, "todo updated");
        Ok(todo)
    }

    async fn delete(&self, id: TodoId) -> Result<Todo> {
        let todo = self.repo.delete(id).await?.ok_or(TodoError::NotFound(id))?;
        tracing::debug!(id = %todo.id, "todo deleted");
        Ok(todo)
    }

    async fn count(&self) -> Result<usize> { Ok(self.repo.count().await?) }
}
