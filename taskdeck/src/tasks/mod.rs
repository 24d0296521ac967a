//! Task snapshot and per-task command surface.
//!
//! The snapshot ([`TaskList`]) is replaced wholesale after every confirmed
//! store mutation; the two derived views partition it by completion flag.
//! [`TaskItem`] turns a single task's gestures into store commands.

pub mod item;
pub mod list;

pub use item::{ItemCategory, TaskItem};
pub use list::TaskList;
