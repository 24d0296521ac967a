//! Terminal UI rendering.

pub mod header;
pub mod input_bar;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Header on top, task panels in the middle, input and status bar below
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Task panels
            Constraint::Length(3), // Input bar
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // Create two-column layout for the task panels
    let panel_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Upcoming
            Constraint::Percentage(50), // Completed
        ])
        .split(main_chunks[1]);

    // Render each panel
    header::render(frame, main_chunks[0], app);
    task_panel::render_upcoming(frame, panel_chunks[0], app);
    task_panel::render_completed(frame, panel_chunks[1], app);
    input_bar::render(frame, main_chunks[2], app);
    status_bar::render(frame, main_chunks[3], app);
}
