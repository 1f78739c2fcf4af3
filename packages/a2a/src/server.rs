// ABOUTME: Axum glue exposing an executor as an A2A JSON-RPC service
// ABOUTME: Serves the agent card plus message/send and tasks/get methods

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use pacta_core::constants::AGENT_CARD_PATH;

use crate::executor::{AgentExecutor, RequestContext};
use crate::jsonrpc::{
    JsonRpcRequest, JsonRpcResponse, CODE_INTERNAL_ERROR, CODE_INVALID_PARAMS,
    CODE_METHOD_NOT_FOUND, CODE_TASK_NOT_FOUND, METHOD_MESSAGE_SEND, METHOD_TASKS_GET,
};
use crate::task::{InMemoryTaskStore, TaskUpdater};
use crate::types::{AgentCard, Message, Task};

#[derive(Clone)]
struct AgentState {
    card: Arc<AgentCard>,
    executor: Arc<dyn AgentExecutor>,
    store: Arc<InMemoryTaskStore>,
}

/// Builds the router for one agent: the well-known card route plus the
/// JSON-RPC endpoint at the root.
pub fn agent_router(card: AgentCard, executor: Arc<dyn AgentExecutor>) -> Router {
    let state = AgentState {
        card: Arc::new(card),
        executor,
        store: Arc::new(InMemoryTaskStore::new()),
    };

    Router::new()
        .route(AGENT_CARD_PATH, get(get_agent_card))
        .route("/", post(handle_rpc))
        .with_state(state)
}

async fn get_agent_card(State(state): State<AgentState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

#[derive(Debug, Deserialize)]
struct MessageSendParams {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct TaskQueryParams {
    id: String,
}

async fn handle_rpc(
    State(state): State<AgentState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    let id = request.id.clone();
    let response = match request.method.as_str() {
        METHOD_MESSAGE_SEND => match serde_json::from_value::<MessageSendParams>(request.params) {
            Ok(params) => handle_message_send(&state, id, params.message).await,
            Err(e) => JsonRpcResponse::failure(id, CODE_INVALID_PARAMS, e.to_string()),
        },
        METHOD_TASKS_GET => match serde_json::from_value::<TaskQueryParams>(request.params) {
            Ok(params) => match state.store.get(&params.id).await {
                Some(task) => task_result(id, &task),
                None => JsonRpcResponse::failure(
                    id,
                    CODE_TASK_NOT_FOUND,
                    format!("Task not found: {}", params.id),
                ),
            },
            Err(e) => JsonRpcResponse::failure(id, CODE_INVALID_PARAMS, e.to_string()),
        },
        other => JsonRpcResponse::failure(
            id,
            CODE_METHOD_NOT_FOUND,
            format!("Unknown method: {}", other),
        ),
    };
    Json(response)
}

async fn handle_message_send(
    state: &AgentState,
    rpc_id: serde_json::Value,
    message: Message,
) -> JsonRpcResponse {
    let task_id = message
        .task_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let context_id = message
        .context_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    info!(%task_id, agent = %state.card.name, "message/send received");

    state
        .store
        .insert(Task::new(task_id.clone(), context_id.clone()))
        .await;

    let context = RequestContext {
        task_id: task_id.clone(),
        context_id,
        message,
    };
    let updater = TaskUpdater::new(state.store.clone(), task_id.clone());

    if let Err(e) = state.executor.execute(context, updater.clone()).await {
        error!(%task_id, error = %e, "executor failed");
        // Executors that already failed the task keep their own message;
        // this only catches errors that escaped before a terminal update.
        let _ = updater.fail(e.to_string()).await;
    }

    match state.store.get(&task_id).await {
        Some(task) => task_result(rpc_id, &task),
        None => JsonRpcResponse::failure(rpc_id, CODE_INTERNAL_ERROR, "task vanished from store"),
    }
}

fn task_result(rpc_id: serde_json::Value, task: &Task) -> JsonRpcResponse {
    match serde_json::to_value(task) {
        Ok(value) => JsonRpcResponse::success(rpc_id, value),
        Err(e) => JsonRpcResponse::failure(rpc_id, CODE_INTERNAL_ERROR, e.to_string()),
    }
}
