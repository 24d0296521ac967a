//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Input => "Enter: add task | Tab: switch panel | Esc: quit | ←→: move cursor",
        PanelFocus::Upcoming | PanelFocus::Completed => {
            "Tab: switch panel | ↑↓/jk: navigate | Enter: toggle done | d: delete | Esc: quit"
        }
    };

    let (dot_color, status_text) = if app.is_connected {
        (theme::SUCCESS, "Connected".to_string())
    } else {
        (theme::OFFLINE, "Offline".to_string())
    };

    let mut spans = vec![
        Span::styled("TaskDeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {status_text}")),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ];

    if let Some(ref note) = app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(note.clone(), theme::normal().fg(theme::WARNING)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
