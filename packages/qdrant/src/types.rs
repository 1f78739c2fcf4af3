// ABOUTME: Wire types for Qdrant points and the chunk payload schema
// ABOUTME: ChunkPayload keys are the retrieval contract between both agents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload stored with every chunk point. The analyzer depends on exactly
/// these keys to regroup and reorder a document, so renaming any of them is
/// a breaking change for existing collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkPayload {
    pub content: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub chunk_length: usize,
    pub document_id: String,
    pub filename: String,
    pub stored_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointStruct {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: serde_json::Value,
}

/// Point returned by a scroll request (no score, optional payload).
#[derive(Debug, Clone, Deserialize)]
pub struct ScrollPoint {
    pub id: serde_json::Value,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl ScrollPoint {
    /// Decodes the payload as a chunk; None when the point was written by
    /// something else or predates the schema.
    pub fn chunk(&self) -> Option<ChunkPayload> {
        self.payload
            .clone()
            .and_then(|p| serde_json::from_value(p).ok())
    }
}

/// Point returned by a vector search.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredPoint {
    pub id: serde_json::Value,
    pub score: f32,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    pub status: String,
    #[serde(default)]
    pub points_count: Option<u64>,
}
