// ABOUTME: Environment-based configuration for servers, Qdrant, and OpenRouter
// ABOUTME: Each agent loads only the config sections it needs

use std::env;
use std::num::ParseIntError;

use thiserror::Error;

use crate::constants::{DEFAULT_ANALYZER_PORT, DEFAULT_COLLECTION, DEFAULT_STORAGE_PORT};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Listener configuration for an agent server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// URL other agents use to reach this one. Matters when the agent sits
    /// behind a tunnel or runs inside a container.
    pub public_url: String,
}

impl ServerConfig {
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>()?,
            Err(_) => default_port,
        };
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let public_url =
            env::var("PUBLIC_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));

        Ok(ServerConfig {
            host,
            port,
            public_url,
        })
    }

    pub fn storage_defaults() -> Result<Self, ConfigError> {
        Self::from_env(DEFAULT_STORAGE_PORT)
    }

    pub fn analyzer_defaults() -> Result<Self, ConfigError> {
        Self::from_env(DEFAULT_ANALYZER_PORT)
    }
}

/// Connection settings for the Qdrant vector store.
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub collection: String,
}

impl QdrantConfig {
    /// Reads QDRANT_URL, or falls back to the QDRANT_HOST/QDRANT_PORT pair
    /// used by local Docker deployments.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = match env::var("QDRANT_URL") {
            Ok(url) => url.trim_end_matches('/').to_string(),
            Err(_) => {
                let host = env::var("QDRANT_HOST").unwrap_or_else(|_| "localhost".to_string());
                let port = match env::var("QDRANT_PORT") {
                    Ok(raw) => raw.parse::<u16>()?,
                    Err(_) => 6333,
                };
                format!("http://{}:{}", host, port)
            }
        };

        let api_key = env::var("QDRANT_API_KEY").ok().filter(|k| !k.is_empty());

        let collection =
            env::var("COLLECTION_NAME").unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());

        Ok(QdrantConfig {
            url,
            api_key,
            collection,
        })
    }
}

/// Credentials and model selection for the OpenRouter API.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl OpenRouterConfig {
    /// Loads the API key plus a model, preferring the agent-specific
    /// override variable (e.g. ANALYZER_MODEL) over OPENROUTER_MODEL.
    pub fn from_env(model_var: &'static str, default_model: &str) -> Result<Self, ConfigError> {
        let api_key =
            env::var("OPENROUTER_API_KEY").map_err(|_| ConfigError::MissingVar("OPENROUTER_API_KEY"))?;

        let api_base = env::var("OPENROUTER_API_BASE")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

        let model = env::var(model_var)
            .or_else(|_| env::var("OPENROUTER_MODEL"))
            .unwrap_or_else(|_| default_model.to_string());

        Ok(OpenRouterConfig {
            api_key,
            api_base,
            model,
        })
    }
}

/// Where the orchestrator finds its sub-agents.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub storage_agent_url: String,
    pub analyzer_agent_url: String,
}

impl OrchestratorConfig {
    pub fn from_env() -> Self {
        let storage_agent_url = env::var("STORAGE_AGENT_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", DEFAULT_STORAGE_PORT));
        let analyzer_agent_url = env::var("ANALYZER_AGENT_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", DEFAULT_ANALYZER_PORT));

        OrchestratorConfig {
            storage_agent_url,
            analyzer_agent_url,
        }
    }
}
