// ABOUTME: OpenRouter integration for Pacta agents
// ABOUTME: Text and structured JSON generation over the chat-completions API

pub mod service;

pub use service::{AiError, AiResponse, AiResult, AiService, Usage};
