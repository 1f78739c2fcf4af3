// ABOUTME: Coordinates the storage and analyzer agents behind one chat surface
// ABOUTME: PDF attachments go straight to storage; text requests are LLM-routed

use std::path::Path;

use base64::Engine;
use tracing::info;

use pacta_a2a::{FileContent, Message, Part};
use pacta_ai::AiService;
use pacta_core::OrchestratorConfig;

use crate::error::OrchestratorError;
use crate::remote::RemoteAgent;
use crate::router::{RouteDecision, Router};

pub const STORAGE_AGENT: &str = "storage";
pub const ANALYZER_AGENT: &str = "analyzer";

pub struct Orchestrator {
    storage: RemoteAgent,
    analyzer: RemoteAgent,
    router: Router,
}

impl Orchestrator {
    /// Discovers both sub-agents from their cards and wires up the router.
    pub async fn connect(
        config: &OrchestratorConfig,
        ai: AiService,
    ) -> Result<Self, OrchestratorError> {
        let storage = RemoteAgent::connect(STORAGE_AGENT, &config.storage_agent_url).await?;
        let analyzer = RemoteAgent::connect(ANALYZER_AGENT, &config.analyzer_agent_url).await?;
        info!(
            storage = %config.storage_agent_url,
            analyzer = %config.analyzer_agent_url,
            "connected to sub-agents"
        );

        Ok(Orchestrator {
            storage,
            analyzer,
            router: Router::new(ai),
        })
    }

    /// Handles one user turn: attachments short-circuit to the storage
    /// agent, plain text goes through the router. At most one sub-agent is
    /// consulted per turn.
    pub async fn handle(
        &self,
        user_text: &str,
        attachment: Option<&Path>,
    ) -> Result<String, OrchestratorError> {
        if let Some(path) = attachment {
            let message = attachment_message(user_text, path)?;
            return self.storage.delegate(message).await;
        }

        let agents = [
            (self.storage.name(), self.storage.description()),
            (self.analyzer.name(), self.analyzer.description()),
        ];
        let decision = self.router.route(user_text, &agents).await?;

        match decision {
            RouteDecision::Respond { text } => Ok(text),
            RouteDecision::Delegate { agent, message } => {
                let target = match agent.as_str() {
                    STORAGE_AGENT => &self.storage,
                    ANALYZER_AGENT => &self.analyzer,
                    other => return Err(OrchestratorError::UnknownAgent(other.to_string())),
                };
                target.delegate(Message::user_text(message)).await
            }
        }
    }
}

/// Builds the message carrying a local PDF as an inline base64 file part.
fn attachment_message(user_text: &str, path: &Path) -> Result<Message, OrchestratorError> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    info!(%filename, size = bytes.len(), "attaching PDF");

    let text = if user_text.trim().is_empty() {
        format!("Store the document {}", filename)
    } else {
        user_text.to_string()
    };

    let mut message = Message::user_text(text);
    message.parts.push(Part::File {
        file: FileContent {
            name: Some(filename),
            mime_type: Some("application/pdf".to_string()),
            bytes: Some(base64::engine::general_purpose::STANDARD.encode(&bytes)),
            uri: None,
        },
    });
    Ok(message)
}
