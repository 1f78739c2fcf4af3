// ABOUTME: Error taxonomy for the A2A protocol crate
// ABOUTME: Covers executor failures, protocol violations, and transport errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum A2aError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid request parameters: {0}")]
    InvalidParams(String),

    #[error("Agent execution failed: {0}")]
    Executor(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type A2aResult<T> = Result<T, A2aError>;
