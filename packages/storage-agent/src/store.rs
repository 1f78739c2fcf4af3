// ABOUTME: Document ingestion into Qdrant: chunk, embed, upsert
// ABOUTME: Owns the chunk payload schema the analyzer relies on

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use pacta_core::constants::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use pacta_pdf::chunk_text;
use pacta_qdrant::{ChunkPayload, Embedder, PointStruct, QdrantClient, QdrantError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document produced no storable chunks")]
    EmptyDocument,

    #[error(transparent)]
    Qdrant(#[from] QdrantError),
}

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub document_id: String,
    pub filename: String,
    pub chunks_stored: usize,
    pub total_characters: usize,
    pub collection: String,
}

/// Writes documents into the shared Qdrant collection. One `document_id`
/// per ingested document; every chunk carries the full payload schema.
pub struct DocumentStore {
    qdrant: QdrantClient,
    embedder: Box<dyn Embedder>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl DocumentStore {
    pub fn new(qdrant: QdrantClient, embedder: Box<dyn Embedder>) -> Self {
        DocumentStore {
            qdrant,
            embedder,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }

    pub fn collection(&self) -> &str {
        self.qdrant.collection()
    }

    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        Ok(self.qdrant.ensure_collection().await?)
    }

    /// Chunks, embeds, and upserts one document. Returns the generated
    /// document id and storage statistics.
    pub async fn store_document(
        &self,
        filename: &str,
        text: &str,
    ) -> Result<StoredDocument, StoreError> {
        let chunks = chunk_text(text, self.chunk_size, self.chunk_overlap);
        if chunks.is_empty() {
            return Err(StoreError::EmptyDocument);
        }

        let document_id = Uuid::new_v4().to_string();
        let stored_at = Utc::now();
        let total_chunks = chunks.len();

        let points: Vec<PointStruct> = chunks
            .iter()
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let payload = ChunkPayload {
                    content: chunk.clone(),
                    chunk_index,
                    total_chunks,
                    chunk_length: chunk.chars().count(),
                    document_id: document_id.clone(),
                    filename: filename.to_string(),
                    stored_at,
                };
                PointStruct {
                    id: Uuid::new_v4().to_string(),
                    vector: self.embedder.embed(chunk),
                    payload: serde_json::to_value(payload).expect("chunk payload serializes"),
                }
            })
            .collect();

        self.qdrant.upsert(points).await?;

        info!(
            %document_id,
            filename,
            chunks = total_chunks,
            "document stored"
        );

        Ok(StoredDocument {
            document_id,
            filename: filename.to_string(),
            chunks_stored: total_chunks,
            total_characters: text.chars().count(),
            collection: self.qdrant.collection().to_string(),
        })
    }
}
