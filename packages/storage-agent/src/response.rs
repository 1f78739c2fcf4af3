// ABOUTME: Structured JSON response envelope for the storage agent
// ABOUTME: Every reply, success or error, uses this shape for integration

use serde::{Deserialize, Serialize};

/// Response envelope: `{status, operation, message?, data?, error?}`.
/// Downstream agents parse this instead of scraping prose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub status: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl Envelope {
    pub fn success(
        operation: impl Into<String>,
        data: serde_json::Value,
        message: impl Into<String>,
    ) -> Self {
        Envelope {
            status: "success".to_string(),
            operation: operation.into(),
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    pub fn error(
        operation: impl Into<String>,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Envelope {
            status: "error".to_string(),
            operation: operation.into(),
            message: None,
            data: None,
            error: Some(ErrorDetail {
                error_type: error_type.into(),
                message: message.into(),
            }),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| {
            // Serialization of plain strings and Values cannot fail, but
            // never answer with nothing.
            "{\"status\":\"error\",\"operation\":\"serialize\"}".to_string()
        })
    }
}

/// Phrases that mark a message as "persist this analysis text" rather than
/// a PDF ingestion request.
const STORAGE_KEYWORDS: &[&str] = &[
    "store this response",
    "save this analysis",
    "store this analysis",
    "save this response",
    "almacena esta respuesta",
    "almacena el análisis",
    "guarda este análisis",
    "almacena esto",
];

/// Decides whether plain text without attachments should be stored as a
/// document. Explicit keywords win; otherwise any substantial text that is
/// not itself asking about a PDF is treated as storable content.
pub fn should_store_text(user_text: &str) -> bool {
    let lowered = user_text.to_lowercase();
    let trimmed = lowered.trim();
    if trimmed.is_empty() {
        return false;
    }
    if STORAGE_KEYWORDS.iter().any(|k| trimmed.contains(k)) {
        return true;
    }
    trimmed.len() > 20 && !trimmed.contains("pdf")
}
