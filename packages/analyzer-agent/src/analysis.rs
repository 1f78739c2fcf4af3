// ABOUTME: LLM-backed legal analysis of contract text
// ABOUTME: Produces typed rights/obligations/prohibitions with criticality

use serde::{Deserialize, Serialize};
use tracing::info;

use pacta_ai::{AiResult, AiService};

/// How consequential a clause is for the affected party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    High,
    Medium,
    Low,
}

/// One identified clause element: a right, obligation, or prohibition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseItem {
    /// Party the element applies to.
    pub party: String,
    pub description: String,
    /// Section or clause number where the element appears.
    pub reference: String,
    pub criticality: Criticality,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractAnalysis {
    #[serde(default)]
    pub rights: Vec<ClauseItem>,
    #[serde(default)]
    pub obligations: Vec<ClauseItem>,
    #[serde(default)]
    pub prohibitions: Vec<ClauseItem>,
}

impl ContractAnalysis {
    pub fn total_elements(&self) -> usize {
        self.rights.len() + self.obligations.len() + self.prohibitions.len()
    }

    pub fn critical_elements(&self) -> usize {
        self.rights
            .iter()
            .chain(&self.obligations)
            .chain(&self.prohibitions)
            .filter(|item| item.criticality == Criticality::High)
            .count()
    }
}

const SYSTEM_PROMPT: &str = "You are a legal analyst specialized in contract review. \
You identify the rights, obligations, and prohibitions a contract imposes on its \
parties, cite the exact section or clause each one comes from, and rate how \
critical each one is. You always answer with JSON only, no prose, no markdown.";

pub struct ContractAnalyzer {
    ai: AiService,
}

impl ContractAnalyzer {
    pub fn new(ai: AiService) -> Self {
        ContractAnalyzer { ai }
    }

    /// Runs the full analysis over one contract's text.
    pub async fn analyze(&self, contract_text: &str) -> AiResult<ContractAnalysis> {
        info!(
            chars = contract_text.chars().count(),
            model = self.ai.model(),
            "analyzing contract"
        );

        let prompt = build_analysis_prompt(contract_text);
        let response = self
            .ai
            .generate_structured::<ContractAnalysis>(prompt, Some(SYSTEM_PROMPT.to_string()))
            .await?;

        info!(
            rights = response.data.rights.len(),
            obligations = response.data.obligations.len(),
            prohibitions = response.data.prohibitions.len(),
            tokens = response.usage.total_tokens(),
            "analysis complete"
        );
        Ok(response.data)
    }
}

fn build_analysis_prompt(contract_text: &str) -> String {
    format!(
        r#"Analyze the following contract exhaustively.

CONTRACT:
{contract_text}

Identify:

1. RIGHTS granted to each party: payment rights, intellectual property use,
   termination rights, audit rights, service entitlements, and any other
   prerogative the contract grants.
2. OBLIGATIONS each party must fulfill: payment, delivery, confidentiality,
   deadlines, quality standards, and any other contractual duty.
3. PROHIBITIONS and restrictions on the parties: non-compete clauses,
   disclosure restrictions, transfer restrictions, usage limits, territorial
   restrictions, and any other prohibition.

Respond with ONLY this JSON structure:
{{
  "rights": [
    {{"party": "affected party", "description": "what the right grants",
      "reference": "section or clause", "criticality": "high|medium|low"}}
  ],
  "obligations": [
    {{"party": "...", "description": "...", "reference": "...", "criticality": "..."}}
  ],
  "prohibitions": [
    {{"party": "...", "description": "...", "reference": "...", "criticality": "..."}}
  ]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacta_core::OpenRouterConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn analyzer_for(server: &MockServer) -> ContractAnalyzer {
        ContractAnalyzer::new(AiService::new(OpenRouterConfig {
            api_key: "test-key".to_string(),
            api_base: server.uri(),
            model: "anthropic/claude-3-haiku".to_string(),
        }))
    }

    fn completion_with(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "gen-1",
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 100, "completion_tokens": 50}
        })
    }

    #[tokio::test]
    async fn analysis_parses_structured_response() {
        let server = MockServer::start().await;
        let analysis_json = r#"{
            "rights": [{"party": "Client", "description": "May terminate with 30 days notice",
                        "reference": "Clause 2", "criticality": "high"}],
            "obligations": [{"party": "Provider", "description": "Deliver services by year end",
                             "reference": "Clause 1", "criticality": "medium"}],
            "prohibitions": []
        }"#;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_with(analysis_json)),
            )
            .mount(&server)
            .await;

        let analysis = analyzer_for(&server)
            .analyze("CLAUSE 1: provider delivers. CLAUSE 2: client may terminate.")
            .await
            .unwrap();

        assert_eq!(analysis.total_elements(), 2);
        assert_eq!(analysis.critical_elements(), 1);
        assert_eq!(analysis.rights[0].party, "Client");
        assert_eq!(analysis.obligations[0].criticality, Criticality::Medium);
    }

    #[tokio::test]
    async fn fenced_json_is_accepted() {
        let server = MockServer::start().await;
        let fenced = "```json\n{\"rights\": [], \"obligations\": [], \"prohibitions\": []}\n```";
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_with(fenced)))
            .mount(&server)
            .await;

        let analysis = analyzer_for(&server).analyze("text").await.unwrap();
        assert_eq!(analysis.total_elements(), 0);
    }

    #[tokio::test]
    async fn missing_sections_default_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_with(r#"{"rights": []}"#)),
            )
            .mount(&server)
            .await;

        let analysis = analyzer_for(&server).analyze("text").await.unwrap();
        assert!(analysis.obligations.is_empty());
        assert!(analysis.prohibitions.is_empty());
    }
}
