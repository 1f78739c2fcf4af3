// ABOUTME: Integration tests for the A2A server and client over real sockets
// ABOUTME: Serves an executor with axum and drives it through A2aClient

use std::sync::Arc;

use async_trait::async_trait;

use pacta_a2a::{
    agent_router, A2aClient, A2aError, A2aResult, AgentCapabilities, AgentCard, AgentExecutor,
    Part, RequestContext, TaskState, TaskUpdater,
};

struct UppercaseExecutor;

#[async_trait]
impl AgentExecutor for UppercaseExecutor {
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2aResult<()> {
        updater.start_work().await?;
        let text = context.message.text_content();
        if text.is_empty() {
            return Err(A2aError::Executor("empty message".into()));
        }
        updater
            .add_artifact(vec![Part::text(text.to_uppercase())], None)
            .await?;
        updater.complete().await
    }
}

fn test_card(url: &str) -> AgentCard {
    AgentCard {
        name: "uppercase_agent".into(),
        description: "uppercases whatever it receives".into(),
        url: url.into(),
        version: "0.0.0".into(),
        default_input_modes: vec!["text/plain".into()],
        default_output_modes: vec!["text/plain".into()],
        capabilities: AgentCapabilities::default(),
        skills: vec![],
    }
}

/// Binds the agent on an OS-assigned port and returns its base URL.
async fn spawn_agent() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let app = agent_router(test_card(&base_url), Arc::new(UppercaseExecutor));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base_url
}

#[tokio::test]
async fn discover_send_and_fetch_roundtrip() {
    let base_url = spawn_agent().await;

    let client = A2aClient::discover(&base_url).await.unwrap();
    assert_eq!(client.card().name, "uppercase_agent");

    let task = client.send_text("hello agents").await.unwrap();
    assert_eq!(task.status.state, TaskState::Completed);
    assert_eq!(task.output_text().as_deref(), Some("HELLO AGENTS"));

    let fetched = client.get_task(&task.id).await.unwrap();
    assert_eq!(fetched.id, task.id);
    assert_eq!(fetched.status.state, TaskState::Completed);
}

#[tokio::test]
async fn executor_error_surfaces_as_failed_task() {
    let base_url = spawn_agent().await;

    let client = A2aClient::discover(&base_url).await.unwrap();
    let task = client.send_text("").await.unwrap();
    assert_eq!(task.status.state, TaskState::Failed);
    let message = task.status.message.unwrap().text_content();
    assert!(message.contains("empty message"));
}

#[tokio::test]
async fn unknown_task_id_is_a_protocol_error() {
    let base_url = spawn_agent().await;

    let client = A2aClient::discover(&base_url).await.unwrap();
    let err = client.get_task("no-such-task").await.unwrap_err();
    assert!(matches!(err, A2aError::Protocol(_)));
}
