//! HTTP client API for the replicated store
//!
//! Endpoints:
//! - `POST /write` - body is an encoded command; proposed through the
//!   consensus engine and acknowledged once committed
//! - `POST /read` - body is a JSON-encoded key (raw bytes as fallback);
//!   served as a linearizable read through the engine
//! - `GET /metrics` - placeholder, empty JSON object
//!
//! Every request goes through the [`ConsensusEngine`] seam; nothing here
//! touches the replicated state directly.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    routing::{get, post},
    Router,
};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::command::Command;
use crate::engine::ConsensusEngine;
use crate::error::StoreError;

/// Shared state for the client HTTP handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Engine the handlers propose to and read through
    pub engine: Arc<dyn ConsensusEngine>,
    /// Deadline for a write to be confirmed committed
    pub write_timeout: Duration,
    /// Deadline for the linearizable read barrier
    pub read_timeout: Duration,
}

impl ApiState {
    pub fn new(
        engine: Arc<dyn ConsensusEngine>,
        write_timeout: Duration,
        read_timeout: Duration,
    ) -> Self {
        ApiState {
            engine,
            write_timeout,
            read_timeout,
        }
    }
}

/// Create the axum router for the client HTTP API.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/write", post(handle_write))
        .route("/read", post(handle_read))
        .route("/metrics", get(handle_metrics))
        .with_state(state)
}

/// Map a store error to the client-visible status code.
fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Decode(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle POST /write - propose a command and wait for quorum commit.
async fn handle_write(State(state): State<ApiState>, body: Bytes) -> (StatusCode, String) {
    // Reject malformed payloads before they reach the engine
    if let Err(err) = Command::decode(&body) {
        return (status_for(&err), err.to_string());
    }

    match timeout(state.write_timeout, state.engine.propose(body.to_vec())).await {
        Ok(Ok(result)) => {
            debug!(index = result.index, "write committed");
            (StatusCode::OK, "ok".to_string())
        }
        Ok(Err(err)) => (status_for(&err), err.to_string()),
        Err(_) => {
            // Deadline elapsed with the proposal still in flight. The write
            // may yet commit: the client must treat this as unknown, not
            // failed, and retry idempotently or re-query.
            let err = StoreError::CommitTimeout(state.write_timeout);
            warn!("{}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Handle POST /read - linearizable read of a single key.
async fn handle_read(State(state): State<ApiState>, body: Bytes) -> (StatusCode, String) {
    // The key arrives JSON-encoded; fall back to the raw body for clients
    // that send it unquoted
    let key = match serde_json::from_slice::<String>(&body) {
        Ok(key) => key,
        Err(_) => match String::from_utf8(body.to_vec()) {
            Ok(key) => key,
            Err(_) => {
                let err = StoreError::Decode("key is not valid UTF-8".to_string());
                return (status_for(&err), err.to_string());
            }
        },
    };

    match timeout(state.read_timeout, state.engine.linearizable_read(&key)).await {
        Ok(Ok(Some(value))) => (StatusCode::OK, value),
        Ok(Ok(None)) => (StatusCode::NOT_FOUND, String::new()),
        Ok(Err(err)) => (status_for(&err), err.to_string()),
        Err(_) => {
            let err = StoreError::ReadTimeout(state.read_timeout);
            warn!("{}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Handle GET /metrics - placeholder empty JSON object.
async fn handle_metrics() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    ([(header::CONTENT_TYPE, "application/json")], "{}")
}
