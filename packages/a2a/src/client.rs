// ABOUTME: HTTP client for talking to remote A2A agents
// ABOUTME: Card discovery plus message/send and tasks/get calls

use std::time::Duration;

use reqwest::Client;
use tracing::info;

use pacta_core::constants::AGENT_CARD_PATH;

use crate::error::{A2aError, A2aResult};
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse, METHOD_MESSAGE_SEND, METHOD_TASKS_GET};
use crate::types::{AgentCard, Message, Task};

/// Client bound to one remote agent.
pub struct A2aClient {
    http: Client,
    base_url: String,
    card: AgentCard,
}

impl A2aClient {
    fn http_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(600))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Fetches the remote agent card and returns a client bound to it.
    pub async fn discover(base_url: &str) -> A2aResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = Self::http_client();

        let card_url = format!("{}{}", base_url, AGENT_CARD_PATH);
        let response = http.get(&card_url).send().await?;
        if !response.status().is_success() {
            return Err(A2aError::Protocol(format!(
                "Agent card fetch returned {} from {}",
                response.status(),
                card_url
            )));
        }
        let card: AgentCard = response.json().await?;
        info!(agent = %card.name, url = %base_url, "discovered remote agent");

        Ok(A2aClient {
            http,
            base_url,
            card,
        })
    }

    pub fn card(&self) -> &AgentCard {
        &self.card
    }

    /// Sends a message and returns the resulting task (terminal state for
    /// non-streaming agents).
    pub async fn send_message(&self, message: Message) -> A2aResult<Task> {
        let request = JsonRpcRequest::new(
            METHOD_MESSAGE_SEND,
            serde_json::json!({ "message": message }),
        );
        self.call_task(request).await
    }

    /// Convenience wrapper for plain-text requests.
    pub async fn send_text(&self, text: impl Into<String>) -> A2aResult<Task> {
        self.send_message(Message::user_text(text)).await
    }

    pub async fn get_task(&self, task_id: &str) -> A2aResult<Task> {
        let request = JsonRpcRequest::new(METHOD_TASKS_GET, serde_json::json!({ "id": task_id }));
        self.call_task(request).await
    }

    async fn call_task(&self, request: JsonRpcRequest) -> A2aResult<Task> {
        let response = self
            .http
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(A2aError::Protocol(format!(
                "Agent {} returned HTTP {}",
                self.card.name,
                response.status()
            )));
        }

        let rpc: JsonRpcResponse = response.json().await?;
        if let Some(error) = rpc.error {
            return Err(A2aError::Protocol(format!(
                "JSON-RPC error {}: {}",
                error.code, error.message
            )));
        }
        let result = rpc
            .result
            .ok_or_else(|| A2aError::Protocol("response had neither result nor error".into()))?;
        Ok(serde_json::from_value(result)?)
    }
}
