// ABOUTME: Error type for orchestration failures

use thiserror::Error;

use pacta_a2a::A2aError;
use pacta_ai::AiError;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("A2A communication failed: {0}")]
    A2a(#[from] A2aError),

    #[error("Routing model call failed: {0}")]
    Ai(#[from] AiError),

    #[error("Router picked unknown agent '{0}'")]
    UnknownAgent(String),

    #[error("Agent '{agent}' failed: {reply}")]
    SubAgentFailed { agent: String, reply: String },

    #[error("Failed to read attachment: {0}")]
    Attachment(#[from] std::io::Error),
}
