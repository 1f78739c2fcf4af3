// ABOUTME: Shared configuration and constants for all Pacta agents
// ABOUTME: Environment-driven config structs with validation errors

pub mod config;
pub mod constants;

pub use config::{ConfigError, OpenRouterConfig, OrchestratorConfig, QdrantConfig, ServerConfig};
