// ABOUTME: pacta binary: serves the agents and drives the orchestrator chat

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

mod commands;

#[derive(Parser)]
#[command(name = "pacta")]
#[command(about = "SaaS contract analysis agents: storage, analysis, orchestration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the storage agent server (PDF ingestion into Qdrant)
    Storage {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run the analyzer agent server (contract analysis over stored documents)
    Analyzer {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Chat with the orchestrator, which delegates to the running agents
    Chat {
        /// One-shot message; omit for an interactive session
        message: Option<String>,
        /// PDF file to attach; goes straight to the storage agent
        #[arg(long)]
        attach: Option<PathBuf>,
    },
    /// Check connectivity to Qdrant, both agents, and OpenRouter credentials
    Doctor,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Storage { port } => commands::serve::run_storage(port).await,
        Commands::Analyzer { port } => commands::serve::run_analyzer(port).await,
        Commands::Chat { message, attach } => commands::chat::run(message, attach).await,
        Commands::Doctor => commands::doctor::run().await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
