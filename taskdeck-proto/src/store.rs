//! Request/response messages for the store service boundary.
//!
//! Each WebSocket text frame carries exactly one [`StoreRequest`] or
//! [`StoreResponse`]. The service answers every request with a single
//! response, in order, so the client can match them without correlation
//! tokens.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// A command sent from the client to the store service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreRequest {
    /// Fetch the full task list.
    List,
    /// Create a new task; the store assigns the id.
    Create {
        /// Display label for the new task (may be empty).
        name: String,
        /// Initial completion flag.
        done: bool,
    },
    /// Replace the name and done flag of an existing task.
    Update {
        /// Which task to update.
        id: TaskId,
        /// New display label.
        name: String,
        /// New completion flag.
        done: bool,
    },
    /// Remove a task.
    Delete {
        /// Which task to remove.
        id: TaskId,
    },
}

/// The store service's answer to a [`StoreRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreResponse {
    /// The full task list, in insertion order.
    Tasks(Vec<Task>),
    /// A task was created; carries the stored record with its assigned id.
    Created(Task),
    /// An update was applied.
    Updated,
    /// A delete was applied.
    Deleted,
    /// The request failed (unknown id, invalid input, internal error).
    Error(String),
}
