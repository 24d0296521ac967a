//! Task record types shared between the client and the store service.
//!
//! A [`Task`] is the unit of durable state. Identifiers are assigned by the
//! store and never by the client; the client treats them as opaque.

use serde::{Deserialize, Serialize};

/// Maximum task name length in characters, enforced by the store service.
pub const MAX_TASK_NAME_LENGTH: usize = 256;

/// Unique identifier for a task, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from a raw store-assigned value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry.
///
/// The `id` is unique within any list snapshot and immutable once assigned.
/// `name` is free-form text; an empty name is legal on the wire (the client
/// performs no validation). `created_at` is store-assigned bookkeeping and
/// plays no part in client-side ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Display label.
    pub name: String,
    /// Completion flag.
    pub done: bool,
    /// Creation time in milliseconds since epoch, if the store recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
}

impl Task {
    /// Creates a task with the given identity and no creation timestamp.
    #[must_use]
    pub const fn new(id: TaskId, name: String, done: bool) -> Self {
        Self {
            id,
            name,
            done,
            created_at: None,
        }
    }
}
