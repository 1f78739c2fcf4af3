// ABOUTME: A2A executor for the analyzer agent
// ABOUTME: Flow: find identifier in text, retrieve from Qdrant, analyze, render

use async_trait::async_trait;
use tracing::{info, warn};

use pacta_a2a::{A2aError, A2aResult, AgentExecutor, Part, RequestContext, TaskUpdater};

use crate::analysis::ContractAnalyzer;
use crate::html;
use crate::query::extract_document_query;
use crate::retriever::{DocumentRetriever, Retrieval};

const LISTING_LIMIT: usize = 20;

pub struct AnalyzerExecutor {
    retriever: DocumentRetriever,
    analyzer: ContractAnalyzer,
}

impl AnalyzerExecutor {
    pub fn new(retriever: DocumentRetriever, analyzer: ContractAnalyzer) -> Self {
        AnalyzerExecutor {
            retriever,
            analyzer,
        }
    }

    async fn finish_with_html(&self, updater: &TaskUpdater, body: String) -> A2aResult<()> {
        updater
            .add_artifact(vec![Part::text(body.clone())], Some("report".to_string()))
            .await?;
        updater.complete_with(body).await
    }
}

#[async_trait]
impl AgentExecutor for AnalyzerExecutor {
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2aResult<()> {
        info!(task_id = %context.task_id, "analyzer agent request");
        updater.start_work().await?;

        let user_text = context.message.text_content();

        // No identifiable document in the request: list what is available
        // instead of failing, so the user can pick one.
        let Some(query) = extract_document_query(&user_text) else {
            let available = self
                .retriever
                .list_documents(LISTING_LIMIT)
                .await
                .map_err(|e| A2aError::Executor(e.to_string()))?;

            if available.is_empty() {
                let message = "No document was named and nothing is stored yet. \
                               Ask the storage agent to store a PDF first, then \
                               name it here for analysis.";
                updater.fail(message).await?;
                return Err(A2aError::Executor("no documents available".into()));
            }
            return self
                .finish_with_html(&updater, html::render_available_documents(&available))
                .await;
        };

        updater
            .working(format!("Looking up '{}' in the knowledge base...", query))
            .await?;

        let retrieval = self.retriever.get_document(&query).await.map_err(|e| {
            warn!(error = %e, "retrieval failed");
            A2aError::Executor(format!("Failed to retrieve document: {e}"))
        })?;

        let document = match retrieval {
            Retrieval::Found(document) => document,
            Retrieval::NotFound => {
                let available = self
                    .retriever
                    .list_documents(LISTING_LIMIT)
                    .await
                    .unwrap_or_default();
                return self
                    .finish_with_html(&updater, html::render_not_found(&query, &available))
                    .await;
            }
            Retrieval::Ambiguous(matches) => {
                return self
                    .finish_with_html(&updater, html::render_ambiguous(&query, &matches))
                    .await;
            }
        };

        info!(
            document_id = %document.document_id,
            filename = %document.filename,
            chunks = document.chunks_used,
            "document retrieved"
        );
        updater
            .working(format!(
                "Found '{}' ({} of {} chunks usable). Analyzing rights, \
                 obligations, and prohibitions...",
                document.filename, document.chunks_used, document.chunks_total
            ))
            .await?;

        let analysis = self
            .analyzer
            .analyze(&document.content)
            .await
            .map_err(|e| A2aError::Executor(format!("Analysis failed: {e}")))?;

        let report =
            html::render_analysis_report(&document.document_id, &document.filename, &analysis);
        self.finish_with_html(&updater, report).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacta_a2a::{InMemoryTaskStore, Message, Task, TaskState};
    use pacta_ai::AiService;
    use pacta_core::{OpenRouterConfig, QdrantConfig};
    use pacta_qdrant::QdrantClient;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn executor_for(qdrant: &MockServer, openrouter: &MockServer) -> AnalyzerExecutor {
        let retriever = DocumentRetriever::new(QdrantClient::new(QdrantConfig {
            url: qdrant.uri(),
            api_key: None,
            collection: "contracts".into(),
        }));
        let analyzer = ContractAnalyzer::new(AiService::new(OpenRouterConfig {
            api_key: "test-key".into(),
            api_base: openrouter.uri(),
            model: "anthropic/claude-3-haiku".into(),
        }));
        AnalyzerExecutor::new(retriever, analyzer)
    }

    async fn run(executor: &AnalyzerExecutor, text: &str) -> (Task, A2aResult<()>) {
        let store = Arc::new(InMemoryTaskStore::new());
        store.insert(Task::new("t1", "c1")).await;
        let context = RequestContext {
            task_id: "t1".into(),
            context_id: "c1".into(),
            message: Message::user_text(text),
        };
        let updater = TaskUpdater::new(store.clone(), "t1");
        let result = executor.execute(context, updater).await;
        (store.get("t1").await.unwrap(), result)
    }

    async fn mount_scroll(server: &MockServer, points: Vec<serde_json::Value>) {
        Mock::given(method("POST"))
            .and(path("/collections/contracts/points/scroll"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"points": points, "next_page_offset": null},
                "status": "ok", "time": 0.0
            })))
            .mount(server)
            .await;
    }

    fn chunk_json(id: &str, filename: &str, index: usize, content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": format!("{id}-{index}"),
            "payload": {
                "content": content,
                "chunk_index": index,
                "total_chunks": 1,
                "chunk_length": content.len(),
                "document_id": id,
                "filename": filename,
                "stored_at": "2026-08-20T10:00:00Z",
            }
        })
    }

    #[tokio::test]
    async fn full_flow_produces_html_report() {
        let qdrant = MockServer::start().await;
        let openrouter = MockServer::start().await;
        mount_scroll(
            &qdrant,
            vec![chunk_json(
                "6f9619ff-8b86-4d01-b42d-00cf4fc964ff",
                "services.pdf",
                0,
                "CLAUSE 2: the client may terminate this agreement with notice.",
            )],
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "gen-1",
                "choices": [{"message": {"role": "assistant", "content":
                    r#"{"rights": [{"party": "Client", "description": "May terminate",
                        "reference": "Clause 2", "criticality": "high"}],
                        "obligations": [], "prohibitions": []}"#}}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5}
            })))
            .mount(&openrouter)
            .await;

        let executor = executor_for(&qdrant, &openrouter);
        let (task, result) = run(&executor, "Analyze the document services.pdf").await;

        assert!(result.is_ok());
        assert_eq!(task.status.state, TaskState::Completed);
        let report = task.output_text().unwrap();
        assert!(report.contains("Contract Analysis: services.pdf"));
        assert!(report.contains("<b>Party:</b> Client"));
    }

    #[tokio::test]
    async fn unnamed_document_lists_available_ones() {
        let qdrant = MockServer::start().await;
        let openrouter = MockServer::start().await;
        mount_scroll(
            &qdrant,
            vec![chunk_json(
                "6f9619ff-8b86-4d01-b42d-00cf4fc964ff",
                "services.pdf",
                0,
                "contract body text for listing purposes here",
            )],
        )
        .await;

        let executor = executor_for(&qdrant, &openrouter);
        let (task, result) = run(&executor, "analyze something for me").await;

        assert!(result.is_ok());
        assert_eq!(task.status.state, TaskState::Completed);
        assert!(task
            .output_text()
            .unwrap()
            .contains("Documents available for analysis"));
    }

    #[tokio::test]
    async fn missing_document_reports_not_found() {
        let qdrant = MockServer::start().await;
        let openrouter = MockServer::start().await;
        mount_scroll(&qdrant, vec![]).await;

        let executor = executor_for(&qdrant, &openrouter);
        let (task, result) = run(&executor, "Analyze the document missing.pdf").await;

        assert!(result.is_ok());
        assert_eq!(task.status.state, TaskState::Completed);
        assert!(task.output_text().unwrap().contains("Document not found"));
    }

    #[tokio::test]
    async fn empty_collection_and_no_query_fails() {
        let qdrant = MockServer::start().await;
        let openrouter = MockServer::start().await;
        mount_scroll(&qdrant, vec![]).await;

        let executor = executor_for(&qdrant, &openrouter);
        let (task, result) = run(&executor, "hello there").await;

        assert!(result.is_err());
        assert_eq!(task.status.state, TaskState::Failed);
    }

    #[tokio::test]
    async fn analysis_failure_fails_the_task() {
        let qdrant = MockServer::start().await;
        let openrouter = MockServer::start().await;
        mount_scroll(
            &qdrant,
            vec![chunk_json(
                "6f9619ff-8b86-4d01-b42d-00cf4fc964ff",
                "services.pdf",
                0,
                "contract body text long enough to survive filtering",
            )],
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream error"))
            .mount(&openrouter)
            .await;

        let executor = executor_for(&qdrant, &openrouter);
        let (_, result) = run(&executor, "Analyze services.pdf").await;
        assert!(matches!(result, Err(A2aError::Executor(_))));
    }
}
