//! Task panel rendering for the upcoming and completed views.

use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use taskdeck_proto::task::Task;

use super::theme;
use crate::app::{App, PanelFocus};
use crate::tasks::{ItemCategory, TaskItem};

/// Render the upcoming tasks panel.
pub fn render_upcoming(frame: &mut Frame, area: Rect, app: &App) {
    let tasks = app.tasks.upcoming();
    render_list(
        frame,
        area,
        "Upcoming",
        theme::UPCOMING_TITLE,
        &tasks,
        app.selected_upcoming,
        app.focus == PanelFocus::Upcoming,
    );
}

/// Render the completed tasks panel.
pub fn render_completed(frame: &mut Frame, area: Rect, app: &App) {
    let tasks = app.tasks.completed();
    render_list(
        frame,
        area,
        "Completed",
        theme::COMPLETED_TITLE,
        &tasks,
        app.selected_completed,
        app.focus == PanelFocus::Completed,
    );
}

/// Render one task list with selection and done-state styling.
fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    title_color: Color,
    tasks: &[&Task],
    selected: usize,
    is_focused: bool,
) {
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let item = TaskItem::from_task(task);
            let base_style = match item.category() {
                ItemCategory::Completed => theme::dimmed(),
                ItemCategory::Upcoming => theme::normal(),
            };

            let line = Line::from(vec![
                Span::styled(format!("[{}]", item.icon()), base_style),
                Span::raw(" "),
                Span::styled(item.name.clone(), base_style),
            ]);

            let style = if idx == selected && is_focused {
                theme::selected()
            } else {
                base_style
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(
            title.to_string(),
            theme::panel_title(title_color),
        ))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
