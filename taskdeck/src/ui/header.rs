//! Header rendering: greeting and clock.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;

/// Render the greeting and the current time.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            app.clock.greeting.to_string(),
            theme::panel_title(theme::HEADER_TITLE),
        ),
        Span::raw("  "),
        Span::styled(app.clock.time_display(), theme::dimmed()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::normal());

    let paragraph = Paragraph::new(line).block(block);

    frame.render_widget(paragraph, area);
}
