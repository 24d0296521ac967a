//! The in-memory task snapshot and its derived views.

use taskdeck_proto::task::Task;

/// The current task list snapshot.
///
/// Holds whatever the store last returned, in the store's return order.
/// The snapshot is only ever replaced wholesale ([`TaskList::replace`]);
/// a failed refresh leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Creates a snapshot from an existing task list.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Replaces the snapshot with a fresh list from the store.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// The not-yet-done sub-sequence, in snapshot order.
    #[must_use]
    pub fn upcoming(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.done).collect()
    }

    /// The done sub-sequence, in snapshot order.
    #[must_use]
    pub fn completed(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.done).collect()
    }

    /// All tasks in snapshot order.
    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
