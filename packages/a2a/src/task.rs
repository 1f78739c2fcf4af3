// ABOUTME: In-memory task store and the TaskUpdater used by executors
// ABOUTME: Updater methods fold status changes and artifacts into the store

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{A2aError, A2aResult};
use crate::types::{Artifact, Message, Part, Task, TaskState, TaskStatus};

/// Task storage keyed by task id. Tasks live for the process lifetime.
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<String, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, task: Task) {
        self.tasks.write().await.insert(task.id.clone(), task);
    }

    pub async fn get(&self, task_id: &str) -> Option<Task> {
        self.tasks.read().await.get(task_id).cloned()
    }

    async fn update<F>(&self, task_id: &str, f: F) -> A2aResult<()>
    where
        F: FnOnce(&mut Task),
    {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(task_id)
            .ok_or_else(|| A2aError::TaskNotFound(task_id.to_string()))?;
        f(task);
        Ok(())
    }
}

/// Handle an executor uses to report progress on one task.
///
/// Status updates replace the current status message; the previous one is
/// appended to the task history so clients can replay the progress trail.
#[derive(Clone)]
pub struct TaskUpdater {
    store: Arc<InMemoryTaskStore>,
    task_id: String,
}

impl TaskUpdater {
    pub fn new(store: Arc<InMemoryTaskStore>, task_id: impl Into<String>) -> Self {
        TaskUpdater {
            store,
            task_id: task_id.into(),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub async fn start_work(&self) -> A2aResult<()> {
        self.set_status(TaskState::Working, None).await
    }

    /// Reports progress with a human-readable message.
    pub async fn working(&self, text: impl Into<String>) -> A2aResult<()> {
        self.set_status(TaskState::Working, Some(Message::agent_text(text)))
            .await
    }

    pub async fn add_artifact(&self, parts: Vec<Part>, name: Option<String>) -> A2aResult<()> {
        let artifact = Artifact {
            artifact_id: Uuid::new_v4().to_string(),
            parts,
            name,
        };
        self.store
            .update(&self.task_id, |task| task.artifacts.push(artifact))
            .await
    }

    pub async fn complete(&self) -> A2aResult<()> {
        self.set_status(TaskState::Completed, None).await
    }

    pub async fn complete_with(&self, text: impl Into<String>) -> A2aResult<()> {
        self.set_status(TaskState::Completed, Some(Message::agent_text(text)))
            .await
    }

    pub async fn fail(&self, text: impl Into<String>) -> A2aResult<()> {
        self.set_status(TaskState::Failed, Some(Message::agent_text(text)))
            .await
    }

    pub async fn cancel(&self) -> A2aResult<()> {
        self.set_status(TaskState::Canceled, None).await
    }

    async fn set_status(&self, state: TaskState, message: Option<Message>) -> A2aResult<()> {
        debug!(task_id = %self.task_id, ?state, "task status update");
        self.store
            .update(&self.task_id, |task| {
                // Terminal states stick; later updates of any kind are
                // ignored once a task has completed, failed, or canceled.
                if task.status.state.is_terminal() {
                    return;
                }
                if let Some(previous) = task.status.message.take() {
                    task.history.push(previous);
                }
                task.status = TaskStatus {
                    state,
                    message,
                    timestamp: Utc::now(),
                };
            })
            .await
    }
}
