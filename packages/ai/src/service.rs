// ABOUTME: AI service for making generation calls through OpenRouter
// ABOUTME: Handles API requests, structured JSON parsing, and usage reporting

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use pacta_core::OpenRouterConfig;

const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type AiResult<T> = Result<T, AiError>;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

#[derive(Debug)]
pub struct AiResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// Chat-completions client bound to one model.
pub struct AiService {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl AiService {
    fn create_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(600))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }

    pub fn new(config: OpenRouterConfig) -> Self {
        Self {
            client: Self::create_client(),
            api_key: config.api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Makes a text generation call.
    pub async fn generate_text(
        &self,
        prompt: String,
        system_prompt: Option<String>,
    ) -> AiResult<AiResponse<String>> {
        let request = self.build_request(prompt, system_prompt);

        info!("Making OpenRouter request: model={}", request.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("OpenRouter request timed out");
                    AiError::ApiError("Request timed out. The model may be overloaded.".to_string())
                } else if e.is_connect() {
                    error!("Failed to connect to OpenRouter: {}", e);
                    AiError::ApiError(format!("Connection failed: {}", e))
                } else {
                    AiError::RequestFailed(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("OpenRouter API error: {} - {}", status, error_text);
            return Err(AiError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        let text = chat
            .choices
            .into_iter()
            .next()
            .ok_or(AiError::InvalidResponse)?
            .message
            .content;

        Ok(AiResponse {
            data: text,
            usage: chat.usage.unwrap_or_default(),
        })
    }

    /// Makes a structured generation call. The prompt must request JSON
    /// output; the response is fence-stripped and parsed into `T`.
    pub async fn generate_structured<T: for<'de> Deserialize<'de>>(
        &self,
        prompt: String,
        system_prompt: Option<String>,
    ) -> AiResult<AiResponse<T>> {
        let response = self.generate_text(prompt, system_prompt).await?;
        let json_text = strip_code_fences(&response.data);

        let data: T = serde_json::from_str(json_text).map_err(|e| {
            error!(
                "JSON parsing failed: {}. Snippet: {}",
                e,
                truncate_chars(json_text, 500)
            );
            AiError::ParseError(format!("Failed to parse JSON: {}", e))
        })?;

        Ok(AiResponse {
            data,
            usage: response.usage,
        })
    }

    fn build_request(&self, prompt: String, system_prompt: Option<String>) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt,
        });

        ChatRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            messages,
        }
    }
}

/// Strips markdown code fences (```json ... ```) models wrap JSON in.
fn strip_code_fences(text: &str) -> &str {
    let cleaned = text.trim();
    if !cleaned.starts_with("```") {
        return cleaned;
    }
    let start = cleaned.find('\n').map(|i| i + 1).unwrap_or(0);
    let end = cleaned[start..]
        .rfind("```")
        .map(|i| i + start)
        .unwrap_or(cleaned.len());
    cleaned[start..end].trim()
}

/// Truncates to at most `max_chars` characters without splitting a
/// multi-byte character.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> AiService {
        AiService::new(OpenRouterConfig {
            api_key: "test-key".into(),
            api_base: server.uri(),
            model: "meta-llama/llama-4-maverick".into(),
        })
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 34}
        })
    }

    #[test]
    fn strips_json_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[tokio::test]
    async fn generate_text_sends_bearer_auth_and_returns_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("hola")))
            .mount(&server)
            .await;

        let response = service_for(&server)
            .generate_text("say hi".into(), None)
            .await
            .unwrap();
        assert_eq!(response.data, "hola");
        assert_eq!(response.usage.total_tokens(), 46);
    }

    #[tokio::test]
    async fn generate_structured_parses_fenced_json() {
        #[derive(Deserialize)]
        struct Out {
            count: u32,
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chat_body("```json\n{\"count\": 3}\n```")),
            )
            .mount(&server)
            .await;

        let response = service_for(&server)
            .generate_structured::<Out>("count".into(), None)
            .await
            .unwrap();
        assert_eq!(response.data.count, 3);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Byte 500 falls inside a two-byte character here.
        let text = format!("x{}", "ñ".repeat(600));
        let snippet = truncate_chars(&text, 500);
        assert_eq!(snippet.chars().count(), 500);
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[tokio::test]
    async fn malformed_multibyte_reply_is_a_parse_error() {
        #[derive(Debug, Deserialize)]
        struct Out {
            #[allow(dead_code)]
            count: u32,
        }

        let server = MockServer::start().await;
        let garbage = format!("x{}", "ñ".repeat(400));
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(&garbage)))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .generate_structured::<Out>("count".into(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));
    }

    #[tokio::test]
    async fn api_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .generate_text("x".into(), None)
            .await
            .unwrap_err();
        match err {
            AiError::ApiError(msg) => assert!(msg.contains("429")),
            other => panic!("expected ApiError, got {:?}", other),
        }
    }
}
