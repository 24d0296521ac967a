//! Input bar rendering for new task entry.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the new-task input box.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Input;

    // Build the input text with cursor
    let mut display_text = app.input.clone();
    if is_focused {
        // Insert cursor character at cursor position
        if app.cursor_position >= display_text.len() {
            display_text.push('█');
        } else {
            display_text.insert(app.cursor_position, '█');
        }
    }

    let input_line = if display_text.is_empty() && !is_focused {
        Line::from(Span::styled("Add a task...", theme::dimmed()))
    } else {
        Line::from(Span::styled(display_text, theme::normal()))
    };

    let block = Block::default()
        .title("New Task")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let paragraph = Paragraph::new(input_line).block(block);

    frame.render_widget(paragraph, area);
}
