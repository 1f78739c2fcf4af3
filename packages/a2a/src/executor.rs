// ABOUTME: AgentExecutor trait implemented by each agent's request handler
// ABOUTME: RequestContext carries the incoming message and task identifiers

use async_trait::async_trait;

use crate::error::A2aResult;
use crate::task::TaskUpdater;
use crate::types::Message;

/// Everything an executor gets about one incoming request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub task_id: String,
    pub context_id: String,
    pub message: Message,
}

/// Per-agent request handler. The server creates a task, then drives the
/// executor; the executor reports progress and results through the updater.
///
/// Returning `Err` marks the task failed unless the executor already moved
/// it to a terminal state itself.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    async fn execute(&self, context: RequestContext, updater: TaskUpdater) -> A2aResult<()>;

    /// Cancellation hook. Default marks the task canceled.
    async fn cancel(&self, _context: RequestContext, updater: TaskUpdater) -> A2aResult<()> {
        updater.cancel().await
    }
}
