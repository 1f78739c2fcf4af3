// ABOUTME: A2A (agent-to-agent) protocol implementation shared by all agents
// ABOUTME: Card/message/task types, JSON-RPC server glue, task store, and client

pub mod client;
pub mod error;
pub mod executor;
pub mod jsonrpc;
pub mod server;
pub mod task;
pub mod types;

pub use client::A2aClient;
pub use error::{A2aError, A2aResult};
pub use executor::{AgentExecutor, RequestContext};
pub use server::agent_router;
pub use task::{InMemoryTaskStore, TaskUpdater};
pub use types::{
    AgentCapabilities, AgentCard, AgentSkill, Artifact, FileContent, Message, Part, Role, Task,
    TaskState, TaskStatus,
};
