// ABOUTME: Public agent card for the storage agent
// ABOUTME: Advertises PDF extraction, vector storage, and JSON output skills

use pacta_a2a::{AgentCapabilities, AgentCard, AgentSkill};

pub fn storage_agent_card(public_url: impl Into<String>) -> AgentCard {
    AgentCard {
        name: "storage-agent".to_string(),
        description: "Processes and stores PDF documents. Extracts text page \
                      by page, chunks it, and indexes the chunks in a Qdrant \
                      vector collection for later retrieval."
            .to_string(),
        url: public_url.into(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_input_modes: vec!["text/plain".to_string(), "application/pdf".to_string()],
        default_output_modes: vec!["application/json".to_string()],
        capabilities: AgentCapabilities {
            streaming: false,
            push_notifications: false,
        },
        skills: vec![
            AgentSkill {
                id: "extract_text_from_pdf".to_string(),
                name: "PDF text extraction".to_string(),
                description: "Extracts the full text content of PDF files, \
                              page by page, in reading order."
                    .to_string(),
                tags: vec!["pdf".to_string(), "text".to_string()],
                examples: vec![
                    "Extract the text from this contract PDF".to_string(),
                    "Read this PDF and give me its content".to_string(),
                ],
            },
            AgentSkill {
                id: "store_pdf_in_qdrant".to_string(),
                name: "Vector storage of PDFs".to_string(),
                description: "Chunks PDF text, embeds each chunk, and stores \
                              the vectors in Qdrant for semantic search."
                    .to_string(),
                tags: vec![
                    "storage".to_string(),
                    "qdrant".to_string(),
                    "vector".to_string(),
                ],
                examples: vec![
                    "Store this contract in the database".to_string(),
                    "Index this document in Qdrant".to_string(),
                ],
            },
            AgentSkill {
                id: "json_structured_response".to_string(),
                name: "Structured JSON responses".to_string(),
                description: "Answers every request with a structured JSON \
                              envelope describing the operation outcome."
                    .to_string(),
                tags: vec!["json".to_string(), "api".to_string()],
                examples: vec!["Give me the result as JSON".to_string()],
            },
        ],
    }
}
