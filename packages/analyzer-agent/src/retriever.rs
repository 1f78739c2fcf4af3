// ABOUTME: Read-only retrieval of stored documents from Qdrant
// ABOUTME: Looks up by document id or filename, filters chunks, rebuilds text

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use pacta_qdrant::{ChunkPayload, QdrantClient, QdrantResult};

use crate::query::is_document_id;

/// One stored document, reassembled from its chunks.
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    pub document_id: String,
    pub filename: String,
    pub stored_at: DateTime<Utc>,
    pub content: String,
    pub chunks_used: usize,
    pub chunks_total: usize,
}

/// Listing entry for one stored document.
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub document_id: String,
    pub filename: String,
    pub stored_at: DateTime<Utc>,
    pub num_chunks: usize,
}

/// Outcome of a lookup. `Ambiguous` carries the candidates so the caller
/// can ask the user to pick a document id.
#[derive(Debug)]
pub enum Retrieval {
    Found(RetrievedDocument),
    NotFound,
    Ambiguous(Vec<DocumentSummary>),
}

/// Read-only companion to the storage agent. Never writes to the
/// collection.
pub struct DocumentRetriever {
    qdrant: QdrantClient,
}

impl DocumentRetriever {
    pub fn new(qdrant: QdrantClient) -> Self {
        DocumentRetriever { qdrant }
    }

    /// Looks a document up by whatever the query is: a UUID goes through
    /// the id path, anything else is treated as a filename.
    pub async fn get_document(&self, query: &str) -> QdrantResult<Retrieval> {
        let query = query.trim();
        if is_document_id(query) {
            info!(document_id = %query, "retrieving by document id");
            self.get_document_by_id(query).await
        } else {
            info!(name = %query, "retrieving by filename");
            self.get_document_by_name(query).await
        }
    }

    pub async fn get_document_by_id(&self, document_id: &str) -> QdrantResult<Retrieval> {
        let filter = QdrantClient::document_filter(document_id);
        let points = self.qdrant.scroll_all(Some(filter)).await?;
        let chunks: Vec<ChunkPayload> = points.iter().filter_map(|p| p.chunk()).collect();

        if chunks.is_empty() {
            return Ok(Retrieval::NotFound);
        }
        Ok(Retrieval::Found(reassemble(document_id, chunks)))
    }

    /// Filename lookup is a partial, case-insensitive match with the `.pdf`
    /// extension ignored. Qdrant has no substring filter on scroll, so the
    /// whole collection is scanned and matched client-side.
    pub async fn get_document_by_name(&self, filename_query: &str) -> QdrantResult<Retrieval> {
        let needle = normalize_name(filename_query);
        let points = self.qdrant.scroll_all(None).await?;

        let mut groups: HashMap<String, Vec<ChunkPayload>> = HashMap::new();
        for point in &points {
            let Some(chunk) = point.chunk() else { continue };
            let stored = normalize_name(&chunk.filename);
            if stored.contains(&needle) || needle.contains(&stored) {
                groups.entry(chunk.document_id.clone()).or_default().push(chunk);
            }
        }

        match groups.len() {
            0 => Ok(Retrieval::NotFound),
            1 => {
                let (document_id, chunks) = groups.into_iter().next().unwrap();
                Ok(Retrieval::Found(reassemble(&document_id, chunks)))
            }
            _ => {
                let mut matches: Vec<DocumentSummary> = groups
                    .into_iter()
                    .map(|(document_id, chunks)| DocumentSummary {
                        document_id,
                        filename: chunks[0].filename.clone(),
                        stored_at: chunks[0].stored_at,
                        num_chunks: chunks.len(),
                    })
                    .collect();
                matches.sort_by(|a, b| b.stored_at.cmp(&a.stored_at));
                Ok(Retrieval::Ambiguous(matches))
            }
        }
    }

    /// Lists stored documents, newest first.
    pub async fn list_documents(&self, limit: usize) -> QdrantResult<Vec<DocumentSummary>> {
        let points = self.qdrant.scroll_all(None).await?;

        let mut index: HashMap<String, DocumentSummary> = HashMap::new();
        for point in &points {
            let Some(chunk) = point.chunk() else { continue };
            index
                .entry(chunk.document_id.clone())
                .and_modify(|summary| summary.num_chunks += 1)
                .or_insert(DocumentSummary {
                    document_id: chunk.document_id.clone(),
                    filename: chunk.filename.clone(),
                    stored_at: chunk.stored_at,
                    num_chunks: 1,
                });
        }

        let mut documents: Vec<DocumentSummary> = index.into_values().collect();
        documents.sort_by(|a, b| b.stored_at.cmp(&a.stored_at));
        documents.truncate(limit);
        Ok(documents)
    }
}

fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(".pdf", "").trim().to_string()
}

/// Sorts chunks by their original position, drops noise, and joins the
/// remainder into the document text.
fn reassemble(document_id: &str, mut chunks: Vec<ChunkPayload>) -> RetrievedDocument {
    chunks.sort_by_key(|c| c.chunk_index);
    let total = chunks.len();

    let kept: Vec<&str> = chunks
        .iter()
        .map(|c| c.content.trim())
        .filter(|text| is_relevant_chunk(text))
        .collect();

    debug!(
        document_id,
        total,
        kept = kept.len(),
        "chunk quality filter applied"
    );

    let first = &chunks[0];
    RetrievedDocument {
        document_id: document_id.to_string(),
        filename: first.filename.clone(),
        stored_at: first.stored_at,
        chunks_used: kept.len(),
        chunks_total: total,
        content: kept.join("\n\n"),
    }
}

/// Quality filter for reassembly. Drops empty chunks, fragments of two
/// words or fewer, chunks with no letters, and mostly-uppercase chunks
/// (section headings split off on their own).
fn is_relevant_chunk(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if text.split_whitespace().count() <= 2 {
        return false;
    }

    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return false;
    }
    let uppercase = letters.iter().filter(|c| c.is_uppercase()).count();
    (uppercase as f64 / letters.len() as f64) <= 0.70
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacta_core::QdrantConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chunk_json(
        document_id: &str,
        filename: &str,
        index: usize,
        total: usize,
        content: &str,
    ) -> serde_json::Value {
        serde_json::json!({
            "id": format!("{document_id}-{index}"),
            "payload": {
                "content": content,
                "chunk_index": index,
                "total_chunks": total,
                "chunk_length": content.len(),
                "document_id": document_id,
                "filename": filename,
                "stored_at": "2026-08-20T10:00:00Z",
            }
        })
    }

    fn retriever_for(server: &MockServer) -> DocumentRetriever {
        DocumentRetriever::new(QdrantClient::new(QdrantConfig {
            url: server.uri(),
            api_key: None,
            collection: "contracts".into(),
        }))
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

    #[test]
    fn quality_filter_drops_noise() {
        assert!(!is_relevant_chunk(""));
        assert!(!is_relevant_chunk("two words"));
        assert!(!is_relevant_chunk("12 34 56 --"));
        assert!(!is_relevant_chunk("SECTION THREE GENERAL TERMS AND CONDITIONS"));
        assert!(is_relevant_chunk(
            "The provider shall deliver the services before December 31."
        ));
    }

    #[tokio::test]
    async fn lookup_by_id_reassembles_in_chunk_order() {
        let server = MockServer::start().await;
        let id = "6f9619ff-8b86-4d01-b42d-00cf4fc964ff";
        // Chunks arrive out of order; reassembly must sort by chunk_index.
        mount_scroll(
            &server,
            vec![
                chunk_json(id, "services.pdf", 1, 2, "second part of the clause text"),
                chunk_json(id, "services.pdf", 0, 2, "first part of the clause text"),
            ],
        )
        .await;

        let retrieval = retriever_for(&server).get_document(id).await.unwrap();
        let Retrieval::Found(doc) = retrieval else {
            panic!("expected Found");
        };
        assert_eq!(doc.filename, "services.pdf");
        assert_eq!(doc.chunks_used, 2);
        assert_eq!(
            doc.content,
            "first part of the clause text\n\nsecond part of the clause text"
        );

        // The id path must send a document_id filter.
        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["filter"]["must"][0]["key"], "document_id");
    }

    #[tokio::test]
    async fn lookup_by_name_matches_partially() {
        let server = MockServer::start().await;
        let id = "11111111-2222-4333-8444-555555555555";
        mount_scroll(
            &server,
            vec![
                chunk_json(id, "saas_agreement.pdf", 0, 1, "the customer may terminate at will"),
                chunk_json(
                    "99999999-8888-4777-8666-555555555555",
                    "nda.pdf",
                    0,
                    1,
                    "confidential information stays confidential",
                ),
            ],
        )
        .await;

        let retrieval = retriever_for(&server)
            .get_document("saas_agreement")
            .await
            .unwrap();
        let Retrieval::Found(doc) = retrieval else {
            panic!("expected Found");
        };
        assert_eq!(doc.document_id, id);
    }

    #[tokio::test]
    async fn same_name_twice_is_ambiguous() {
        let server = MockServer::start().await;
        mount_scroll(
            &server,
            vec![
                chunk_json(
                    "11111111-2222-4333-8444-555555555555",
                    "contract.pdf",
                    0,
                    1,
                    "first upload of the contract text",
                ),
                chunk_json(
                    "99999999-8888-4777-8666-555555555555",
                    "contract.pdf",
                    0,
                    1,
                    "second upload of the contract text",
                ),
            ],
        )
        .await;

        let retrieval = retriever_for(&server)
            .get_document("contract.pdf")
            .await
            .unwrap();
        let Retrieval::Ambiguous(matches) = retrieval else {
            panic!("expected Ambiguous");
        };
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let server = MockServer::start().await;
        mount_scroll(&server, vec![]).await;

        let retrieval = retriever_for(&server)
            .get_document("6f9619ff-8b86-4d01-b42d-00cf4fc964ff")
            .await
            .unwrap();
        assert!(matches!(retrieval, Retrieval::NotFound));
    }

    #[tokio::test]
    async fn list_documents_groups_and_counts_chunks() {
        let server = MockServer::start().await;
        let id = "11111111-2222-4333-8444-555555555555";
        mount_scroll(
            &server,
            vec![
                chunk_json(id, "contract.pdf", 0, 2, "part one of the text"),
                chunk_json(id, "contract.pdf", 1, 2, "part two of the text"),
            ],
        )
        .await;

        let documents = retriever_for(&server).list_documents(20).await.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].num_chunks, 2);
        assert_eq!(documents[0].filename, "contract.pdf");
    }

    #[tokio::test]
    async fn foreign_points_are_ignored() {
        let server = MockServer::start().await;
        mount_scroll(
            &server,
            vec![serde_json::json!({"id": "x", "payload": {"other": "schema"}})],
        )
        .await;

        let documents = retriever_for(&server).list_documents(20).await.unwrap();
        assert!(documents.is_empty());
    }
}
