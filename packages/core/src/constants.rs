// ABOUTME: Project-wide constants shared across agent crates
// ABOUTME: Chunking defaults, vector dimensions, and default ports

/// Maximum size of a text chunk in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Characters carried over between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Dimension of chunk embedding vectors stored in Qdrant.
pub const VECTOR_SIZE: usize = 768;

/// Default collection used when COLLECTION_NAME is not set.
pub const DEFAULT_COLLECTION: &str = "contracts";

/// Default port for the storage agent server.
pub const DEFAULT_STORAGE_PORT: u16 = 8001;

/// Default port for the analyzer agent server.
pub const DEFAULT_ANALYZER_PORT: u16 = 8002;

/// Page size used when scrolling points out of Qdrant.
pub const SCROLL_PAGE_SIZE: usize = 200;

/// Well-known path where every agent publishes its card.
pub const AGENT_CARD_PATH: &str = "/.well-known/agent-card.json";
