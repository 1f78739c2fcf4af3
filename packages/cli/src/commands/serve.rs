// ABOUTME: Starts the storage or analyzer agent as an HTTP server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use colored::*;
use tower_http::cors::{Any, CorsLayer};

use pacta_a2a::agent_router;
use pacta_ai::AiService;
use pacta_analyzer_agent::{
    analyzer_agent_card, AnalyzerExecutor, ContractAnalyzer, DocumentRetriever,
};
use pacta_core::{OpenRouterConfig, QdrantConfig, ServerConfig};
use pacta_qdrant::{HashEmbedder, QdrantClient};
use pacta_storage_agent::{storage_agent_card, DocumentStore, StorageExecutor};

const DEFAULT_ANALYZER_MODEL: &str = "anthropic/claude-3-haiku";

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn serve(
    name: &str,
    config: &ServerConfig,
    app: axum::Router,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    println!("{} {} listening on {}", "✅".green(), name, addr);
    println!("   agent card: {}/.well-known/agent-card.json", config.public_url);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn run_storage(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = ServerConfig::storage_defaults()?;
    if let Some(port) = port {
        config.port = port;
        config.public_url = format!("http://localhost:{}", port);
    }

    let qdrant_config = QdrantConfig::from_env()?;
    println!(
        "{} storage agent: Qdrant at {} (collection '{}')",
        "🚀".cyan(),
        qdrant_config.url,
        qdrant_config.collection
    );

    let qdrant = QdrantClient::new(qdrant_config);
    let store = DocumentStore::new(qdrant, Box::new(HashEmbedder::new()));
    store
        .ensure_collection()
        .await
        .context("could not reach Qdrant; is it running?")?;

    let card = storage_agent_card(config.public_url.clone());
    let app = agent_router(card, Arc::new(StorageExecutor::new(store))).layer(cors_layer());
    serve("storage agent", &config, app).await
}

pub async fn run_analyzer(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = ServerConfig::analyzer_defaults()?;
    if let Some(port) = port {
        config.port = port;
        config.public_url = format!("http://localhost:{}", port);
    }

    let qdrant_config = QdrantConfig::from_env()?;
    let openrouter = OpenRouterConfig::from_env("ANALYZER_MODEL", DEFAULT_ANALYZER_MODEL)?;
    println!(
        "{} analyzer agent: Qdrant at {} (collection '{}'), model {}",
        "🚀".cyan(),
        qdrant_config.url,
        qdrant_config.collection,
        openrouter.model
    );

    let retriever = DocumentRetriever::new(QdrantClient::new(qdrant_config));
    let analyzer = ContractAnalyzer::new(AiService::new(openrouter));

    let card = analyzer_agent_card(config.public_url.clone());
    let app = agent_router(card, Arc::new(AnalyzerExecutor::new(retriever, analyzer)))
        .layer(cors_layer());
    serve("analyzer agent", &config, app).await
}
