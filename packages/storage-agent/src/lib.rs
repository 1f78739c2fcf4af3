// ABOUTME: Storage agent ("almacenador"): PDF ingestion into Qdrant over A2A
// ABOUTME: Extracts text, chunks, embeds, and upserts with document metadata

pub mod card;
pub mod executor;
pub mod response;
pub mod store;

pub use card::storage_agent_card;
pub use executor::StorageExecutor;
pub use response::Envelope;
pub use store::{DocumentStore, StoredDocument};
