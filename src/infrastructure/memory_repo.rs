use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

struct Inner {
    items: Vec<Todo>,
    next_id: u64,
}

/// Process-local todo store. Every access goes through one mutex so id
/// assignment and list order stay consistent across worker threads.
#[derive(Clone)]
pub struct InMemoryTodoRepository {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(Inner { items: Vec::new(), next_id: 1 })) }
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let mut inner = self.inner.lock().await;
        let id = TodoId(inner.next_id);
        inner.next_id += 1;
        let todo = Todo { id, text: input.text, completed: false, created_at: Utc::now(), updated_at: None };
        inner.items.push(todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        let inner = self.inner.lock().await;
        Ok(inner.items.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        Ok(self.inner.lock().await.items.clone())
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Option<Todo>> {
        let mut inner = self.inner.lock().await;
        let Some(todo) = inner.items.iter_mut().find(|t| t.id == id) else { return Ok(None) };
        todo.apply(input, Utc::now());
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: TodoId) -> Result<Option<Todo>> {
        let mut inner = self.inner.lock().await;
        let Some(index) = inner.items.iter().position(|t| t.id == id) else { return Ok(None) };
        Ok(Some(inner.items.remove(index)))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.lock().await.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(text: &str) -> CreateTodo { CreateTodo { text: text.into() } }

    #[tokio::test]
    async fn ids_start_at_one_and_are_not_reused_after_delete() {
        let repo = InMemoryTodoRepository::new();
        let a = repo.create(create("a")).await.unwrap();
        let b = repo.create(create("b")).await.unwrap();
        assert_eq!((a.id, b.id), (TodoId(1), TodoId(2)));

        repo.delete(b.id).await.unwrap();
        let c = repo.create(create("c")).await.unwrap();
        assert_eq!(c.id, TodoId(3));
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let repo = InMemoryTodoRepository::new();
        for text in ["a", "b", "c"] { repo.create(create(text)).await.unwrap(); }

        let removed = repo.delete(TodoId(2)).await.unwrap().unwrap();
        assert_eq!(removed.text, "b");
        let texts: Vec<_> = repo.list().await.unwrap().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, ["a", "c"]);
        assert!(repo.delete(TodoId(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let repo = InMemoryTodoRepository::new();
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(create(&format!("t{i}"))).await.unwrap().id })
            })
            .collect();
        let mut ids = Vec::new();
        for h in handles { ids.push(h.await.unwrap()); }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(repo.count().await.unwrap(), 32);
    }
}
