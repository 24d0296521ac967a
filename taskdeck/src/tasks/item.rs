//! Per-task command surface and display attributes.
//!
//! A [`TaskItem`] carries exactly what one list row needs: identity, label,
//! and done flag. Gestures become store commands; the visible state only
//! changes after the store confirms and the list is re-fetched, never
//! optimistically.

use taskdeck_proto::task::{Task, TaskId};

use crate::store::StoreCommand;

/// Display category of a task row, driven by the done flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    /// Not done yet.
    Upcoming,
    /// Done.
    Completed,
}

impl ItemCategory {
    /// Style class name for this category.
    #[must_use]
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_class())
    }
}

/// One task as rendered and acted on in a list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Display label.
    pub name: String,
    /// Completion flag.
    pub done: bool,
}

impl TaskItem {
    /// Builds an item from a snapshot task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
            done: task.done,
        }
    }

    /// The command that flips this task's done flag at the store.
    ///
    /// Sends the same id and name with the inverted flag; the row itself
    /// does not change until the confirmed refresh lands.
    #[must_use]
    pub fn toggle_command(&self) -> StoreCommand {
        StoreCommand::Update {
            id: self.id,
            name: self.name.clone(),
            done: !self.done,
        }
    }

    /// The command that removes this task at the store.
    #[must_use]
    pub fn delete_command(&self) -> StoreCommand {
        StoreCommand::Delete { id: self.id }
    }

    /// Which display category this row belongs to.
    #[must_use]
    pub const fn category(&self) -> ItemCategory {
        if self.done {
            ItemCategory::Completed
        } else {
            ItemCategory::Upcoming
        }
    }

    /// Row marker glyph: a check for done, a plus for upcoming.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        if self.done { "\u{2713}" } else { "+" }
    }
}
