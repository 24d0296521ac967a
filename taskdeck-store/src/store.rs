//! In-memory task storage with store-assigned identifiers.
//!
//! The [`TaskStore`] is the authoritative record set. Tasks are kept in
//! insertion order, which is also the order returned by [`TaskStore::list`]
//! and therefore the order clients render.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;

use taskdeck_proto::task::{MAX_TASK_NAME_LENGTH, Task, TaskId};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// Task name exceeds the maximum length.
    #[error("task name too long (max {max} characters)")]
    NameTooLong {
        /// The configured maximum.
        max: usize,
    },
    /// Task with the given ID was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Tasks plus the next identifier to hand out.
struct Records {
    tasks: Vec<Task>,
    next_id: u64,
}

/// Thread-safe in-memory task store.
///
/// Identifiers are assigned from a monotonic counter starting at 0 and are
/// never reused within the store's lifetime, so a delete followed by a
/// create cannot resurrect an old id.
pub struct TaskStore {
    records: RwLock<Records>,
    max_name_len: usize,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates an empty store with the default name length limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_name_len(MAX_TASK_NAME_LENGTH)
    }

    /// Creates an empty store with a custom name length limit.
    #[must_use]
    pub fn with_max_name_len(max_name_len: usize) -> Self {
        Self {
            records: RwLock::new(Records {
                tasks: Vec::new(),
                next_id: 0,
            }),
            max_name_len,
        }
    }

    /// Returns the current timestamp in milliseconds since epoch.
    fn now_ms() -> u64 {
        u64::try_from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
        )
        .unwrap_or(u64::MAX)
    }

    /// Creates a task, assigning the next identifier and a creation
    /// timestamp. Empty names are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NameTooLong`] if the name exceeds the
    /// configured limit.
    pub async fn create(&self, name: &str, done: bool) -> Result<Task, TaskStoreError> {
        if name.chars().count() > self.max_name_len {
            return Err(TaskStoreError::NameTooLong {
                max: self.max_name_len,
            });
        }

        let mut records = self.records.write().await;
        let task = Task {
            id: TaskId::from_raw(records.next_id),
            name: name.to_string(),
            done,
            created_at: Some(Self::now_ms()),
        };
        records.next_id += 1;
        records.tasks.push(task.clone());
        Ok(task)
    }

    /// Returns all tasks in insertion order.
    pub async fn list(&self) -> Vec<Task> {
        let records = self.records.read().await;
        records.tasks.clone()
    }

    /// Replaces the name and done flag of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] if no task has the given id, or
    /// [`TaskStoreError::NameTooLong`] if the new name exceeds the limit.
    pub async fn update(&self, id: TaskId, name: &str, done: bool) -> Result<(), TaskStoreError> {
        if name.chars().count() > self.max_name_len {
            return Err(TaskStoreError::NameTooLong {
                max: self.max_name_len,
            });
        }

        let mut records = self.records.write().await;
        let task = records
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskStoreError::NotFound(id))?;
        task.name = name.to_string();
        task.done = done;
        Ok(())
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] if no task has the given id.
    pub async fn delete(&self, id: TaskId) -> Result<(), TaskStoreError> {
        let mut records = self.records.write().await;
        let index = records
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskStoreError::NotFound(id))?;
        records.tasks.remove(index);
        Ok(())
    }
}
