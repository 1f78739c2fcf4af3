// ABOUTME: Qdrant vector store integration shared by storage and analyzer
// ABOUTME: REST client, chunk payload schema, and deterministic embedder

pub mod client;
pub mod embed;
pub mod types;

pub use client::{QdrantClient, QdrantError, QdrantResult};
pub use embed::{Embedder, HashEmbedder};
pub use types::{ChunkPayload, CollectionInfo, PointStruct, ScoredPoint, ScrollPoint};
