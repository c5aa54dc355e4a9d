#[cfg(test)]
mod tests {
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::{error::TodoError, repository::TodoRepository, todo::{CreateTodo, Todo, TodoId, UpdateTodo}};
    use crate::infrastructure::memory_repo::InMemoryTodoRepository;
    use anyhow::Result;
    use async_trait::async_trait;

    fn service() -> TodoServiceImpl<InMemoryTodoRepository> {
        TodoServiceImpl::new(InMemoryTodoRepository::new())
    }

    fn create(text: &str) -> CreateTodo { CreateTodo { text: text.into() } }

    #[tokio::test]
    async fn unit_create_and_get() {
        let service = service();
        let created = service.create(create("  X  ")).await.unwrap();
        assert_eq!(created.text, "X");
        assert!(!created.completed);
        assert!(created.updated_at.is_none());
        let got = service.get(created.id).await.unwrap();
        assert_eq!(got, created);
    }

    #[tokio::test]
    async fn ids_strictly_increase() {
        let service = service();
        let mut last = 0;
        for i in 0..5 {
            let todo = service.create(create(&format!("task {i}"))).await.unwrap();
            assert!(todo.id.0 > last);
            last = todo.id.0;
        }
    }

    #[tokio::test]
    async fn blank_text_is_rejected_and_store_unchanged() {
        let service = service();
        service.create(create("keep")).await.unwrap();
        for blank in ["", "   ", "\t\n"] {
            let err = service.create(create(blank)).await.unwrap_err();
            assert!(matches!(err, TodoError::Validation(_)));
        }
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_returns_insertion_order() {
        let service = service();
        for text in ["one", "two", "three"] { service.create(create(text)).await.unwrap(); }
        let texts: Vec<_> = service.list().await.unwrap().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_store_unchanged() {
        let service = service();
        let todo = service.create(create("a")).await.unwrap();
        let err = service.update(TodoId(99), UpdateTodo { text: Some("b".into()), completed: Some(true) }).await.unwrap_err();
        assert!(matches!(err, TodoError::NotFound(TodoId(99))));
        let err = service.update(TodoId(99), UpdateTodo { text: Some("  ".into()), completed: None }).await.unwrap_err();
        assert!(matches!(err, TodoError::NotFound(_)));
        assert_eq!(service.list().await.unwrap(), vec![todo]);
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let service = service();
        let todo = service.create(create("write tests")).await.unwrap();

        let done = service.update(todo.id, UpdateTodo { text: None, completed: Some(true) }).await.unwrap();
        assert_eq!(done.text, "write tests");
        assert!(done.completed);
        assert!(done.updated_at.is_some());
        assert_eq!(done.created_at, todo.created_at);

        let renamed = service.update(todo.id, UpdateTodo { text: Some("  write more tests ".into()), completed: None }).await.unwrap();
        assert_eq!(renamed.text, "write more tests");
        assert!(renamed.completed);
    }

    #[tokio::test]
    async fn update_with_blank_text_is_rejected() {
        let service = service();
        let todo = service.create(create("a")).await.unwrap();
        let err = service.update(todo.id, UpdateTodo { text: Some(" ".into()), completed: Some(true) }).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert_eq!(service.get(todo.id).await.unwrap(), todo);
    }

    #[tokio::test]
    async fn delete_twice_fails_the_second_time() {
        let service = service();
        let a = service.create(create("a")).await.unwrap();
        let b = service.create(create("b")).await.unwrap();
        assert_eq!(service.delete(a.id).await.unwrap(), a);
        assert!(matches!(service.delete(a.id).await.unwrap_err(), TodoError::NotFound(_)));
        assert_eq!(service.list().await.unwrap(), vec![b]);
    }

    struct FailingRepo;

    #[async_trait]
    impl TodoRepository for FailingRepo {
        async fn create(&self, _: CreateTodo) -> Result<Todo> { anyhow::bail!("disk on fire") }
        async fn get(&self, _: TodoId) -> Result<Option<Todo>> { anyhow::bail!("disk on fire") }
        async fn list(&self) -> Result<Vec<Todo>> { anyhow::bail!("disk on fire") }
        async fn update(&self, _: TodoId, _: UpdateTodo) -> Result<Option<Todo>> { anyhow::bail!("disk on fire") }
        async fn delete(&self, _: TodoId) -> Result<Option<Todo>> { anyhow::bail!("disk on fire") }
        async fn count(&self) -> Result<usize> { anyhow::bail!("disk on fire") }
    }

    #[tokio::test]
    async fn repository_failures_surface_as_storage_errors() {
        let service = TodoServiceImpl::new(FailingRepo);
        assert!(matches!(service.list().await.unwrap_err(), TodoError::Storage(_)));
        assert!(matches!(service.create(create("x")).await.unwrap_err(), TodoError::Storage(_)));
    }
}
