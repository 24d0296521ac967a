//! Store coordinator for wiring the TUI to the async task-store client.
//!
//! This module bridges the synchronous TUI event loop (crossterm
//! poll-based) with the WebSocket connection to the store service. It
//! spawns a background tokio task and communicates with the main thread
//! via [`StoreCommand`] / [`StoreEvent`] channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── StoreEvent ───  tokio background task
//!                     ─── StoreCommand →
//! ```
//!
//! The worker processes commands strictly one at a time: encode the
//! request, send it, await the single response, emit the matching event.
//! That sequencing is what guarantees a mutation's follow-up refresh is
//! only dispatched after the mutation's own completion event fires. There
//! is no pipelining, no retry, and no cancellation of an in-flight request.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use taskdeck_proto::codec;
use taskdeck_proto::store::{StoreRequest, StoreResponse};
use taskdeck_proto::task::{Task, TaskId};

/// WebSocket connection to the store service.
type StoreSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Which store operation a command or failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    /// Fetching the full list.
    List,
    /// Creating a task.
    Create,
    /// Updating a task.
    Update,
    /// Deleting a task.
    Delete,
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Commands sent from the TUI main loop to the store worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Re-fetch the full task list.
    Refresh,
    /// Create a task with the given name (may be empty) and `done = false`.
    /// The store assigns the id.
    Create {
        /// Raw input text, submitted without validation.
        name: String,
    },
    /// Replace a task's name and done flag.
    Update {
        /// Which task to update.
        id: TaskId,
        /// Name to store (unchanged on a toggle).
        name: String,
        /// New completion flag.
        done: bool,
    },
    /// Remove a task.
    Delete {
        /// Which task to remove.
        id: TaskId,
    },
    /// Gracefully shut down the store worker.
    Shutdown,
}

/// Events sent from the store worker to the TUI main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A full list fetch succeeded; this replaces the snapshot.
    Loaded(Vec<Task>),
    /// A create was confirmed; carries the stored record with its id.
    Created(Task),
    /// An update was confirmed.
    Updated,
    /// A delete was confirmed.
    Deleted,
    /// A store operation failed. The snapshot stays as it was.
    Failed {
        /// Which operation failed.
        op: StoreOp,
        /// Human-readable reason.
        reason: String,
    },
    /// Connection status update.
    ConnectionStatus {
        /// Whether the store connection is live.
        connected: bool,
    },
}

/// Configuration for the store coordinator.
#[derive(Debug, Clone)]
pub struct StoreClientConfig {
    /// WebSocket URL of the store service (e.g., `ws://127.0.0.1:9200/ws`).
    pub store_url: String,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,
}

/// Default channel capacity for commands and events.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

impl StoreClientConfig {
    /// Creates a config with default channel capacity.
    #[must_use]
    pub const fn new(store_url: String) -> Self {
        Self {
            store_url,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Spawn the store worker and return channel handles.
///
/// Connects a WebSocket to the store service and spawns a command handler
/// that serializes all store traffic. The caller should fall back to
/// offline mode on error.
///
/// # Errors
///
/// Returns an error string if the WebSocket connection fails.
pub async fn spawn_store(
    config: StoreClientConfig,
) -> Result<(mpsc::Sender<StoreCommand>, mpsc::Receiver<StoreEvent>), String> {
    let (socket, _) = tokio_tungstenite::connect_async(&config.store_url)
        .await
        .map_err(|e| format!("store connection failed: {e}"))?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<StoreCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<StoreEvent>(config.channel_capacity);

    // Announce the live connection before any command is processed.
    let _ = evt_tx
        .send(StoreEvent::ConnectionStatus { connected: true })
        .await;

    tokio::spawn(async move {
        command_handler(socket, cmd_rx, evt_tx).await;
    });

    Ok((cmd_tx, evt_rx))
}

/// Background task: handle commands from the TUI main loop, one at a time.
async fn command_handler(
    mut socket: StoreSocket,
    mut cmd_rx: mpsc::Receiver<StoreCommand>,
    evt_tx: mpsc::Sender<StoreEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let (op, request) = match cmd {
            StoreCommand::Shutdown => {
                tracing::info!("store command handler shutting down");
                break;
            }
            StoreCommand::Refresh => (StoreOp::List, StoreRequest::List),
            StoreCommand::Create { name } => {
                (StoreOp::Create, StoreRequest::Create { name, done: false })
            }
            StoreCommand::Update { id, name, done } => {
                (StoreOp::Update, StoreRequest::Update { id, name, done })
            }
            StoreCommand::Delete { id } => (StoreOp::Delete, StoreRequest::Delete { id }),
        };

        match execute(&mut socket, op, &request).await {
            Ok(event) => {
                if evt_tx.send(event).await.is_err() {
                    // TUI dropped; exit.
                    break;
                }
            }
            Err(reason) => {
                tracing::warn!(op = %op, request = ?request, reason = %reason, "store request failed");
                let lost = reason.contains("connection closed")
                    || reason.contains("send failed")
                    || reason.contains("receive failed");
                if evt_tx.send(StoreEvent::Failed { op, reason }).await.is_err() {
                    break;
                }
                if lost {
                    let _ = evt_tx
                        .send(StoreEvent::ConnectionStatus { connected: false })
                        .await;
                }
            }
        }
    }
}

/// Sends one request and waits for its single response.
async fn execute(
    socket: &mut StoreSocket,
    op: StoreOp,
    request: &StoreRequest,
) -> Result<StoreEvent, String> {
    let text = codec::encode_request(request).map_err(|e| format!("encode failed: {e}"))?;
    socket
        .send(Message::Text(text.into()))
        .await
        .map_err(|e| format!("send failed: {e}"))?;

    // The service answers every request with exactly one text frame;
    // skip control frames while waiting for it.
    while let Some(frame) = socket.next().await {
        let frame = frame.map_err(|e| format!("receive failed: {e}"))?;
        match frame {
            Message::Text(text) => {
                let response = codec::decode_response(text.as_str())
                    .map_err(|e| format!("decode failed: {e}"))?;
                return interpret(op, response);
            }
            Message::Close(_) => return Err("connection closed".to_string()),
            _ => {
                // Ignore binary, ping, pong frames.
            }
        }
    }
    Err("connection closed".to_string())
}

/// Maps a response onto the event the requesting operation expects.
fn interpret(op: StoreOp, response: StoreResponse) -> Result<StoreEvent, String> {
    match (op, response) {
        (StoreOp::List, StoreResponse::Tasks(tasks)) => Ok(StoreEvent::Loaded(tasks)),
        (StoreOp::Create, StoreResponse::Created(task)) => Ok(StoreEvent::Created(task)),
        (StoreOp::Update, StoreResponse::Updated) => Ok(StoreEvent::Updated),
        (StoreOp::Delete, StoreResponse::Deleted) => Ok(StoreEvent::Deleted),
        (_, StoreResponse::Error(reason)) => Err(reason),
        (_, other) => Err(format!("unexpected response: {other:?}")),
    }
}
