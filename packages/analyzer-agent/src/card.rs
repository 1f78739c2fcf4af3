// ABOUTME: Public agent card for the contract analyzer agent

use pacta_a2a::{AgentCapabilities, AgentCard, AgentSkill};

pub fn analyzer_agent_card(public_url: impl Into<String>) -> AgentCard {
    AgentCard {
        name: "contract-analyzer-agent".to_string(),
        description: "Performs legal analysis of stored contracts. Identifies \
                      rights, obligations, and prohibitions with criticality \
                      ratings and exact clause references, and renders the \
                      result as an HTML report."
            .to_string(),
        url: public_url.into(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_input_modes: vec!["text/plain".to_string()],
        default_output_modes: vec!["text/html".to_string()],
        capabilities: AgentCapabilities {
            streaming: false,
            push_notifications: false,
        },
        skills: vec![
            AgentSkill {
                id: "identify_rights".to_string(),
                name: "Contract rights identification".to_string(),
                description: "Identifies the rights a contract grants to each \
                              party: payment, intellectual property use, \
                              termination, audit, and service entitlements."
                    .to_string(),
                tags: vec!["rights".to_string(), "contracts".to_string()],
                examples: vec![
                    "What rights does the client have in this contract?".to_string(),
                    "List the termination rights".to_string(),
                ],
            },
            AgentSkill {
                id: "identify_obligations".to_string(),
                name: "Contract obligations identification".to_string(),
                description: "Extracts the duties each party must fulfill: \
                              payment, delivery, confidentiality, deadlines, \
                              and quality standards."
                    .to_string(),
                tags: vec!["obligations".to_string(), "contracts".to_string()],
                examples: vec!["What are the provider's obligations?".to_string()],
            },
            AgentSkill {
                id: "identify_prohibitions".to_string(),
                name: "Contract prohibitions identification".to_string(),
                description: "Detects restrictions on the parties: non-compete, \
                              disclosure limits, usage limits, and territorial \
                              restrictions."
                    .to_string(),
                tags: vec!["prohibitions".to_string(), "restrictions".to_string()],
                examples: vec!["What is forbidden in this contract?".to_string()],
            },
            AgentSkill {
                id: "comprehensive_contract_analysis".to_string(),
                name: "Comprehensive contract analysis".to_string(),
                description: "Analyzes a stored contract end to end, rating \
                              every right, obligation, and prohibition by \
                              criticality with exact clause references."
                    .to_string(),
                tags: vec!["analysis".to_string(), "criticality".to_string()],
                examples: vec![
                    "Analyze the document services_contract.pdf".to_string(),
                    "Give me a full analysis of 6f9619ff-8b86-4d01-b42d-00cf4fc964ff".to_string(),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_lists_all_analysis_skills() {
        let card = analyzer_agent_card("http://localhost:8002");
        let ids: Vec<&str> = card.skills.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "identify_rights",
                "identify_obligations",
                "identify_prohibitions",
                "comprehensive_contract_analysis"
            ]
        );
    }
}
