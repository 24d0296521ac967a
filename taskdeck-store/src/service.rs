//! Store service core: shared state, WebSocket handler, and request
//! dispatch.
//!
//! The service accepts WebSocket connections and processes one
//! [`StoreRequest`] text frame at a time, answering each with exactly one
//! [`StoreResponse`] on the same connection. Requests from one client never
//! interleave with their own responses, which is what lets clients match
//! responses to requests positionally.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};

use taskdeck_proto::codec;
use taskdeck_proto::store::{StoreRequest, StoreResponse};

use crate::store::TaskStore;

/// Shared service state holding the task records.
pub struct StoreState {
    /// The authoritative task records.
    pub tasks: TaskStore,
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreState {
    /// Creates service state with an empty store and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: TaskStore::new(),
        }
    }

    /// Creates service state around a pre-configured store.
    #[must_use]
    pub const fn with_store(tasks: TaskStore) -> Self {
        Self { tasks }
    }
}

/// Handles an upgraded WebSocket connection for a single client.
///
/// Reads request frames until the client disconnects. Malformed frames get
/// a [`StoreResponse::Error`] reply rather than closing the connection.
pub async fn handle_socket(mut socket: WebSocket, state: Arc<StoreState>) {
    tracing::info!("client connected");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = handle_request(text.as_str(), &state).await;
                match codec::encode_response(&response) {
                    Ok(encoded) => {
                        if socket.send(Message::Text(encoded.into())).await.is_err() {
                            tracing::warn!("WebSocket write failed");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode response");
                    }
                }
            }
            Message::Close(_) => {
                tracing::info!("client sent close frame");
                break;
            }
            _ => {
                // Ignore binary, ping, pong frames.
            }
        }
    }

    tracing::info!("client disconnected");
}

/// Decodes and dispatches a single request frame.
async fn handle_request(text: &str, state: &StoreState) -> StoreResponse {
    let request = match codec::decode_request(text) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "failed to decode request frame");
            return StoreResponse::Error(format!("bad request: {e}"));
        }
    };

    match request {
        StoreRequest::List => {
            let tasks = state.tasks.list().await;
            tracing::debug!(count = tasks.len(), "listing tasks");
            StoreResponse::Tasks(tasks)
        }
        StoreRequest::Create { name, done } => match state.tasks.create(&name, done).await {
            Ok(task) => {
                tracing::info!(id = %task.id, name = %task.name, "task created");
                StoreResponse::Created(task)
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "create rejected");
                StoreResponse::Error(e.to_string())
            }
        },
        StoreRequest::Update { id, name, done } => {
            match state.tasks.update(id, &name, done).await {
                Ok(()) => {
                    tracing::info!(id = %id, done = done, "task updated");
                    StoreResponse::Updated
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "update rejected");
                    StoreResponse::Error(e.to_string())
                }
            }
        }
        StoreRequest::Delete { id } => match state.tasks.delete(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "task deleted");
                StoreResponse::Deleted
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "delete rejected");
                StoreResponse::Error(e.to_string())
            }
        },
    }
}

/// Starts the store service on the given address and returns the bound
/// address and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(StoreState::new())).await
}

/// Starts the store service with a pre-configured [`StoreState`].
///
/// Use [`TaskStore::with_max_name_len`] to build a state with custom limits
/// from the resolved [`crate::config::StoreConfig`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<StoreState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = axum::Router::new()
        .route("/ws", axum::routing::get(ws_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "store service error");
        }
    });

    Ok((bound_addr, handle))
}

/// axum handler that upgrades an HTTP request to a WebSocket connection.
async fn ws_handler(
    ws: axum::extract::ws::WebSocketUpgrade,
    axum::extract::State(state): axum::extract::State<Arc<StoreState>>,
) -> impl axum::response::IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}
