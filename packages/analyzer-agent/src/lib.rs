// ABOUTME: Analyzer agent ("analizador"): legal analysis of stored contracts
// ABOUTME: Retrieves chunks from Qdrant, runs LLM analysis, renders HTML

pub mod analysis;
pub mod card;
pub mod executor;
pub mod html;
pub mod query;
pub mod retriever;

pub use analysis::{ClauseItem, ContractAnalysis, ContractAnalyzer, Criticality};
pub use card::analyzer_agent_card;
pub use executor::AnalyzerExecutor;
pub use query::extract_document_query;
pub use retriever::{DocumentRetriever, DocumentSummary, Retrieval, RetrievedDocument};
