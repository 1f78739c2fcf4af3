// ABOUTME: Orchestrator chat: one-shot or interactive turn loop

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::*;

use pacta_ai::AiService;
use pacta_core::{OpenRouterConfig, OrchestratorConfig};
use pacta_orchestrator::Orchestrator;

const DEFAULT_ORCHESTRATOR_MODEL: &str = "openai/gpt-4o-mini";

pub async fn run(message: Option<String>, attach: Option<PathBuf>) -> anyhow::Result<()> {
    let config = OrchestratorConfig::from_env();
    let openrouter = OpenRouterConfig::from_env("ORCHESTRATOR_MODEL", DEFAULT_ORCHESTRATOR_MODEL)?;

    println!(
        "{} connecting to agents at {} and {}",
        "🔗".cyan(),
        config.storage_agent_url,
        config.analyzer_agent_url
    );
    let orchestrator = Orchestrator::connect(&config, AiService::new(openrouter)).await?;

    if message.is_some() || attach.is_some() {
        let text = message.unwrap_or_default();
        let reply = orchestrator.handle(&text, attach.as_deref()).await?;
        println!("{}", reply);
        return Ok(());
    }

    interactive_loop(&orchestrator).await
}

async fn interactive_loop(orchestrator: &Orchestrator) -> anyhow::Result<()> {
    println!("{}", "Contract analysis assistant. Type a request, 'attach <file.pdf> [note]' to upload, or 'exit' to quit.".bold());

    let stdin = io::stdin();
    loop {
        print!("{} ", ">".green().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let (text, attachment) = parse_turn(line);
        match orchestrator.handle(text, attachment.as_deref()).await {
            Ok(reply) => println!("{}", reply),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }
    Ok(())
}

/// Splits an `attach <path> [text]` command into its attachment and the
/// remaining instruction. Anything else is a plain text turn.
fn parse_turn(line: &str) -> (&str, Option<PathBuf>) {
    let Some(rest) = line.strip_prefix("attach ") else {
        return (line, None);
    };
    let rest = rest.trim();
    match rest.split_once(char::is_whitespace) {
        Some((path, text)) => (text.trim(), Some(Path::new(path).to_path_buf())),
        None => ("", Some(Path::new(rest).to_path_buf())),
    }
}
