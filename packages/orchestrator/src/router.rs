// ABOUTME: LLM-based routing of user requests to sub-agents
// ABOUTME: The model picks one agent per turn or answers directly

use serde::Deserialize;
use tracing::info;

use pacta_ai::{AiResult, AiService};

/// What the router decided for one user turn.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Forward the request to a sub-agent, rephrased as `message`.
    Delegate { agent: String, message: String },
    /// Answer the user directly without delegation.
    Respond { text: String },
}

const ROUTER_SYSTEM_PROMPT: &str = "You are the coordinator of a SaaS contract \
analysis assistant. You never analyze or store documents yourself; two \
specialized agents do that. Your only job is to decide, for each user \
request, whether to delegate and to whom. Be precise and never invent \
information that is not in the user's request. Answer with JSON only.";

pub struct Router {
    ai: AiService,
}

impl Router {
    pub fn new(ai: AiService) -> Self {
        Router { ai }
    }

    /// Decides what to do with one user request. `agents` describes the
    /// available sub-agents as (routing name, description) pairs.
    pub async fn route(
        &self,
        user_text: &str,
        agents: &[(&str, &str)],
    ) -> AiResult<RouteDecision> {
        let agent_list: String = agents
            .iter()
            .map(|(name, description)| format!("- \"{}\": {}\n", name, description))
            .collect();

        let prompt = format!(
            r#"Available agents:
{agent_list}
User request:
{user_text}

Decide what to do. Delegate when the request matches an agent's specialty:
storing documents or pasted analyses goes to the storage agent, analyzing a
stored contract goes to the analyzer agent. Answer directly only for greetings,
questions about your own capabilities, or requests no agent covers (in that
case explain what you can do). Delegate to at most one agent.

Respond with ONLY one of these JSON shapes:
{{"action": "delegate", "agent": "<agent name>", "message": "<instruction to forward>"}}
{{"action": "respond", "text": "<answer to the user>"}}"#
        );

        let decision = self
            .ai
            .generate_structured::<RouteDecision>(prompt, Some(ROUTER_SYSTEM_PROMPT.to_string()))
            .await?
            .data;

        match &decision {
            RouteDecision::Delegate { agent, .. } => info!(%agent, "routing to sub-agent"),
            RouteDecision::Respond { .. } => info!("answering directly"),
        }
        Ok(decision)
    }
}
