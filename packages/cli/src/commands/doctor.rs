// ABOUTME: Connectivity checks for Qdrant, both agents, and OpenRouter config

use anyhow::bail;
use colored::*;

use pacta_core::constants::AGENT_CARD_PATH;
use pacta_core::{OrchestratorConfig, QdrantConfig};
use pacta_qdrant::QdrantClient;

fn report(label: &str, ok: bool, detail: &str) {
    let mark = if ok { "✅".green() } else { "❌".red() };
    println!("{} {}: {}", mark, label, detail);
}

pub async fn run() -> anyhow::Result<()> {
    let mut failures = 0;

    match QdrantConfig::from_env() {
        Ok(config) => {
            let collection = config.collection.clone();
            let url = config.url.clone();
            let client = QdrantClient::new(config);
            match client.collection_exists().await {
                Ok(true) => match client.collection_info().await {
                    Ok(info) => report(
                        "qdrant",
                        true,
                        &format!(
                            "{}: collection '{}' ({} points, status {})",
                            url,
                            collection,
                            info.points_count.unwrap_or(0),
                            info.status
                        ),
                    ),
                    Err(e) => {
                        failures += 1;
                        report("qdrant", false, &e.to_string());
                    }
                },
                Ok(false) => report(
                    "qdrant",
                    true,
                    &format!(
                        "{} reachable; collection '{}' not created yet (the storage agent creates it)",
                        url, collection
                    ),
                ),
                Err(e) => {
                    failures += 1;
                    report("qdrant", false, &e.to_string());
                }
            }
        }
        Err(e) => {
            failures += 1;
            report("qdrant", false, &e.to_string());
        }
    }

    let agents = OrchestratorConfig::from_env();
    let http = reqwest::Client::new();
    for (label, base_url) in [
        ("storage agent", &agents.storage_agent_url),
        ("analyzer agent", &agents.analyzer_agent_url),
    ] {
        let card_url = format!("{}{}", base_url.trim_end_matches('/'), AGENT_CARD_PATH);
        match http.get(&card_url).send().await {
            Ok(response) if response.status().is_success() => {
                let name = response
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|card| card["name"].as_str().map(str::to_string))
                    .unwrap_or_else(|| "unknown".to_string());
                report(label, true, &format!("{} ({})", base_url, name));
            }
            Ok(response) => {
                failures += 1;
                report(label, false, &format!("{} returned {}", card_url, response.status()));
            }
            Err(e) => {
                failures += 1;
                report(label, false, &format!("not reachable: {}", e));
            }
        }
    }

    let has_key = std::env::var("OPENROUTER_API_KEY")
        .map(|k| !k.is_empty())
        .unwrap_or(false);
    if has_key {
        report("openrouter", true, "OPENROUTER_API_KEY is set");
    } else {
        failures += 1;
        report("openrouter", false, "OPENROUTER_API_KEY is missing");
    }

    if failures > 0 {
        bail!("{} check(s) failed", failures);
    }
    println!("{}", "All checks passed.".green().bold());
    Ok(())
}
