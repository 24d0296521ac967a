//! Application state and event handling.
//!
//! `App` owns the task snapshot, the derived panel selections, the clock,
//! and the input line. Key events produce [`StoreCommand`]s for the store
//! worker; store events come back through [`App::apply_store_event`], which
//! is the only place the snapshot is replaced. Nothing is patched locally:
//! every confirmed mutation answers with a follow-up refresh.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_proto::task::{Task, TaskId};

use crate::clock::{CLOCK_REFRESH_INTERVAL, ClockState, ClockTimer};
use crate::store::{StoreCommand, StoreEvent};
use crate::tasks::{TaskItem, TaskList};

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Input line is focused (default).
    Input,
    /// Upcoming task list is focused.
    Upcoming,
    /// Completed task list is focused.
    Completed,
}

/// Main application state.
pub struct App {
    /// Current text input.
    pub input: String,
    /// Cursor position in input (character index).
    pub cursor_position: usize,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// The task snapshot; replaced wholesale on every successful refresh.
    pub tasks: TaskList,
    /// Selected row in the upcoming panel.
    pub selected_upcoming: usize,
    /// Selected row in the completed panel.
    pub selected_completed: usize,
    /// Current clock display state.
    pub clock: ClockState,
    /// Whether the store connection is live.
    pub is_connected: bool,
    /// Last status note shown in the status bar.
    pub status_message: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    clock_timer: ClockTimer,
}

impl App {
    /// Create a new application with placeholder demo data.
    ///
    /// The demo tasks are shown until the first successful refresh replaces
    /// them with the store's authoritative list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor_position: 0,
            focus: PanelFocus::Input,
            tasks: TaskList::from_tasks(Self::demo_tasks()),
            selected_upcoming: 0,
            selected_completed: 0,
            clock: ClockState::now(),
            is_connected: false,
            status_message: None,
            should_quit: false,
            clock_timer: ClockTimer::new(CLOCK_REFRESH_INTERVAL),
        }
    }

    /// Override the clock refresh interval (from config).
    #[must_use]
    pub fn with_clock_refresh(mut self, interval: Duration) -> Self {
        self.clock_timer = ClockTimer::new(interval);
        self
    }

    /// Placeholder tasks shown before the store answers.
    fn demo_tasks() -> Vec<Task> {
        vec![
            Task::new(TaskId::from_raw(0), "Feed the dog".to_string(), false),
            Task::new(TaskId::from_raw(1), "Wash the car".to_string(), false),
            Task::new(
                TaskId::from_raw(2),
                "Send email to manager".to_string(),
                true,
            ),
        ]
    }

    /// Handle a key event.
    ///
    /// Returns `Some(StoreCommand)` when the gesture requires a store
    /// round trip (submit, toggle, delete).
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.cycle_focus_backward();
                return None;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.cycle_focus_forward();
                return None;
            }
            _ => {}
        }

        // Focus-specific shortcuts
        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::Upcoming | PanelFocus::Completed => self.handle_list_key(key),
        }
    }

    /// Handle key event when the input line is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Enter => return Some(self.submit_task()),
            KeyCode::Char(c) => self.enter_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.input.len(),
            _ => {}
        }
        None
    }

    /// Handle key event when one of the task panels is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Enter => {
                return self
                    .selected_task()
                    .map(|t| TaskItem::from_task(t).toggle_command());
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                return self
                    .selected_task()
                    .map(|t| TaskItem::from_task(t).delete_command());
            }
            _ => {}
        }
        None
    }

    /// Submit the current input as a new task.
    ///
    /// No validation happens here: whatever the input holds is submitted,
    /// empty string included, and the input clears before the store
    /// answers. A failed create therefore loses the typed text; the store's
    /// verdict arrives later as a `Created` or `Failed` event.
    fn submit_task(&mut self) -> StoreCommand {
        let name = self.input.clone();
        self.input.clear();
        self.cursor_position = 0;
        StoreCommand::Create { name }
    }

    /// Apply a store event, returning a follow-up command when one is due.
    ///
    /// A confirmed mutation (create, update, delete) always answers with a
    /// `Refresh` so the snapshot comes from the store, id assignments
    /// included. A failure only logs; the snapshot stays as it was.
    pub fn apply_store_event(&mut self, event: StoreEvent) -> Option<StoreCommand> {
        match event {
            StoreEvent::Loaded(tasks) => {
                tracing::debug!(count = tasks.len(), "snapshot replaced");
                self.tasks.replace(tasks);
                self.clamp_selections();
                None
            }
            StoreEvent::Created(_) | StoreEvent::Updated | StoreEvent::Deleted => {
                Some(StoreCommand::Refresh)
            }
            StoreEvent::Failed { op, reason } => {
                tracing::warn!(op = %op, reason = %reason, "store operation failed");
                self.status_message = Some(format!("Store {op} failed — list unchanged"));
                None
            }
            StoreEvent::ConnectionStatus { connected } => {
                self.set_connection_status(connected);
                None
            }
        }
    }

    /// Recompute the clock when its interval has elapsed.
    pub fn tick_clock(&mut self) {
        if let Some(clock) = self.clock_timer.tick() {
            self.clock = clock;
        }
    }

    /// Update the connection indicator.
    pub const fn set_connection_status(&mut self, connected: bool) {
        self.is_connected = connected;
    }

    /// Replace the status bar note.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// The task under the cursor in the focused panel, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        match self.focus {
            PanelFocus::Input => None,
            PanelFocus::Upcoming => self.tasks.upcoming().get(self.selected_upcoming).copied(),
            PanelFocus::Completed => self
                .tasks
                .completed()
                .get(self.selected_completed)
                .copied(),
        }
    }

    /// Cycle focus forward: Input -> Upcoming -> Completed -> Input.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::Upcoming,
            PanelFocus::Upcoming => PanelFocus::Completed,
            PanelFocus::Completed => PanelFocus::Input,
        };
    }

    /// Cycle focus backward: Input -> Completed -> Upcoming -> Input.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::Completed,
            PanelFocus::Completed => PanelFocus::Upcoming,
            PanelFocus::Upcoming => PanelFocus::Input,
        };
    }

    /// Move the focused panel's selection up.
    fn move_selection_up(&mut self) {
        match self.focus {
            PanelFocus::Upcoming => {
                if self.selected_upcoming > 0 {
                    self.selected_upcoming -= 1;
                }
            }
            PanelFocus::Completed => {
                if self.selected_completed > 0 {
                    self.selected_completed -= 1;
                }
            }
            PanelFocus::Input => {}
        }
    }

    /// Move the focused panel's selection down.
    fn move_selection_down(&mut self) {
        match self.focus {
            PanelFocus::Upcoming => {
                let len = self.tasks.upcoming().len();
                if self.selected_upcoming + 1 < len {
                    self.selected_upcoming += 1;
                }
            }
            PanelFocus::Completed => {
                let len = self.tasks.completed().len();
                if self.selected_completed + 1 < len {
                    self.selected_completed += 1;
                }
            }
            PanelFocus::Input => {}
        }
    }

    /// Keep selections valid after a snapshot replacement.
    fn clamp_selections(&mut self) {
        self.selected_upcoming = self
            .selected_upcoming
            .min(self.tasks.upcoming().len().saturating_sub(1));
        self.selected_completed = self
            .selected_completed
            .min(self.tasks.completed().len().saturating_sub(1));
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.input.remove(self.cursor_position - 1);
            self.cursor_position -= 1;
        }
    }

    /// Move cursor left.
    const fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Move cursor right.
    const fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.len() {
            self.cursor_position += 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
