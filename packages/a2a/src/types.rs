// ABOUTME: Wire types for the A2A protocol: agent cards, messages, tasks
// ABOUTME: Serialized in the camelCase/kebab-case shapes the protocol defines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public description of an agent, served at `/.well-known/agent-card.json`.
/// Other agents read the card to learn where and how to talk to this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    pub capabilities: AgentCapabilities,
    pub skills: Vec<AgentSkill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub push_notifications: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// One piece of a message: plain text, a file, or structured data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
    File { file: FileContent },
    Data { data: serde_json::Value },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// File payload carried inline (base64 bytes) or by reference (URI).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Base64-encoded file content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

impl Message {
    pub fn user_text(text: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            parts: vec![Part::text(text)],
            message_id: Uuid::new_v4().to_string(),
            task_id: None,
            context_id: None,
        }
    }

    pub fn agent_text(text: impl Into<String>) -> Self {
        Message {
            role: Role::Agent,
            parts: vec![Part::text(text)],
            message_id: Uuid::new_v4().to_string(),
            task_id: None,
            context_id: None,
        }
    }

    /// Concatenated text of all text parts, space separated.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    Completed,
    Canceled,
    Failed,
}

impl TaskState {
    /// Terminal states cannot transition further.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Canceled | TaskState::Failed
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub artifact_id: String,
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub context_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    /// Intermediate status messages, oldest first.
    #[serde(default)]
    pub history: Vec<Message>,
}

impl Task {
    pub fn new(id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            context_id: context_id.into(),
            status: TaskStatus {
                state: TaskState::Submitted,
                message: None,
                timestamp: Utc::now(),
            },
            artifacts: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Text of the final output: artifact text parts first, falling back to
    /// the last status message.
    pub fn output_text(&self) -> Option<String> {
        let artifact_text: Vec<&str> = self
            .artifacts
            .iter()
            .flat_map(|a| a.parts.iter())
            .filter_map(Part::as_text)
            .collect();
        if !artifact_text.is_empty() {
            return Some(artifact_text.join("\n"));
        }
        self.status
            .message
            .as_ref()
            .map(Message::text_content)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn part_serializes_with_kind_tag() {
        let json = serde_json::to_value(Part::text("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "text", "text": "hello"}));
    }

    #[test]
    fn task_state_uses_kebab_case() {
        let json = serde_json::to_string(&TaskState::InputRequired).unwrap();
        assert_eq!(json, "\"input-required\"");
    }

    #[test]
    fn file_part_round_trips() {
        let part = Part::File {
            file: FileContent {
                name: Some("contract.pdf".into()),
                mime_type: Some("application/pdf".into()),
                bytes: Some("JVBERi0=".into()),
                uri: None,
            },
        };
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains("\"mimeType\":\"application/pdf\""));
        let back: Part = serde_json::from_str(&json).unwrap();
        match back {
            Part::File { file } => assert_eq!(file.name.as_deref(), Some("contract.pdf")),
            other => panic!("expected file part, got {:?}", other),
        }
    }

    #[test]
    fn output_text_prefers_artifacts_over_status_message() {
        let mut task = Task::new("t1", "c1");
        task.status.message = Some(Message::agent_text("working"));
        assert_eq!(task.output_text().as_deref(), Some("working"));

        task.artifacts.push(Artifact {
            artifact_id: "a1".into(),
            parts: vec![Part::text("final report")],
            name: None,
        });
        assert_eq!(task.output_text().as_deref(), Some("final report"));
    }
}
