// ABOUTME: Handle to one remote sub-agent discovered by its agent card

use tracing::info;

use pacta_a2a::{A2aClient, A2aResult, Message, TaskState};

use crate::error::OrchestratorError;

/// A sub-agent the orchestrator can delegate to.
pub struct RemoteAgent {
    name: String,
    client: A2aClient,
}

impl RemoteAgent {
    /// Discovers the agent at `base_url` and binds a handle under the given
    /// routing name.
    pub async fn connect(name: impl Into<String>, base_url: &str) -> A2aResult<Self> {
        let client = A2aClient::discover(base_url).await?;
        Ok(RemoteAgent {
            name: name.into(),
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.client.card().description
    }

    /// Sends a message and waits for the terminal task, returning its text
    /// output. A failed task becomes an error carrying the agent's reply.
    pub async fn delegate(&self, message: Message) -> Result<String, OrchestratorError> {
        info!(agent = %self.name, "delegating to sub-agent");
        let task = self.client.send_message(message).await?;
        let output = task.output_text().unwrap_or_default();

        match task.status.state {
            TaskState::Failed => Err(OrchestratorError::SubAgentFailed {
                agent: self.name.clone(),
                reply: output,
            }),
            _ => Ok(output),
        }
    }
}
