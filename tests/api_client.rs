use std::time::Duration;

use axum::{routing::get, Router};
use todo_summary::application::{summary::SummaryWorkflow, todo_service::TodoServiceImpl};
use todo_summary::client::{ApiClient, ClientError, DEFAULT_TIMEOUT};
use todo_summary::domain::todo::{TodoId, UpdateTodo};
use todo_summary::http::routing::{self, AppState};
use todo_summary::infrastructure::memory_repo::InMemoryTodoRepository;

async fn serve() -> ApiClient {
    let service = TodoServiceImpl::new(InMemoryTodoRepository::new());
    let summary = SummaryWorkflow::new(service.clone(), None, None);
    let router = routing::app(AppState { service, summary });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    ApiClient::new(format!("http://{}/", addr), DEFAULT_TIMEOUT).unwrap()
}

#[tokio::test]
async fn client_drives_full_lifecycle() {
    let client = serve().await;

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.environment.todo_count, 0);
    assert!(!health.environment.gemini_configured);

    let milk = client.create("Buy milk").await.unwrap();
    let report = client.create("Finish report").await.unwrap();
    assert_eq!((milk.id, report.id), (TodoId(1), TodoId(2)));

    let done = client.update(milk.id, &UpdateTodo { text: None, completed: Some(true) }).await.unwrap();
    assert!(done.completed);
    assert_eq!(done.text, "Buy milk");

    let deleted = client.delete(report.id).await.unwrap();
    assert_eq!(deleted.text, "Finish report");

    let todos = client.list().await.unwrap();
    assert_eq!(todos, vec![done]);
    assert_eq!(client.health().await.unwrap().environment.todo_count, 1);
}

#[tokio::test]
async fn client_surfaces_server_messages() {
    let client = serve().await;

    match client.create("   ").await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Text is required");
        }
        other => panic!("unexpected {other:?}"),
    }

    match client.delete(TodoId(5)).await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status, 404),
        other => panic!("unexpected {other:?}"),
    }

    match client.summarize().await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "❌ No todos to summarize");
        }
        other => panic!("unexpected {other:?}"),
    }

    client.create("a").await.unwrap();
    let err = client.summarize().await.unwrap_err();
    assert_eq!(err.to_string(), "❌ Gemini API key not configured");
}

#[tokio::test]
async fn client_reports_unreachable_server() {
    let closed = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = ApiClient::new(format!("http://{}", closed), DEFAULT_TIMEOUT).unwrap();
    assert!(matches!(client.list().await, Err(ClientError::Transport(_))));
}

#[tokio::test]
async fn client_gives_up_on_a_stalled_server() {
    let router = Router::new().route("/todos", get(|| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        "[]"
    }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let client = ApiClient::new(format!("http://{}", addr), Duration::from_millis(200)).unwrap();
    assert!(matches!(client.list().await, Err(ClientError::Timeout)));
}
