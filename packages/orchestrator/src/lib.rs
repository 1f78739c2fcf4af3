// ABOUTME: Orchestrator ("orquestador"): one chat surface over both agents
// ABOUTME: Discovers sub-agents by card and routes each turn with an LLM

pub mod error;
pub mod orchestrator;
pub mod remote;
pub mod router;

pub use error::OrchestratorError;
pub use orchestrator::{Orchestrator, ANALYZER_AGENT, STORAGE_AGENT};
pub use remote::RemoteAgent;
pub use router::{RouteDecision, Router};
