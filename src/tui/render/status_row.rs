use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let count = format!(
        "{} of {} left ",
        app.manager.list().remaining(),
        app.manager.list().len()
    );
    let count_width = display_width(&count);

    // A failed save wins over the key hints
    let (left, left_style) = if let Some(err) = app.manager.last_store_error() {
        (
            format!(" Save failed: {}", err),
            Style::default().fg(app.theme.destructive).bg(bg),
        )
    } else if app.show_key_hints {
        (
            format!(" {}", key_hints(app.focus)),
            Style::default().fg(app.theme.muted).bg(bg),
        )
    } else {
        (String::new(), Style::default().bg(bg))
    };
    let left = truncate_to_width(&left, width.saturating_sub(count_width + 1));
    let padding = width.saturating_sub(display_width(&left) + count_width);

    let line = Line::from(vec![
        Span::styled(left, left_style),
        Span::styled(" ".repeat(padding), Style::default().bg(bg)),
        Span::styled(count, Style::default().fg(app.theme.secondary).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn key_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::List => "Space toggle  d delete  f filter  a add  ? help  q quit",
        Focus::Title | Focus::Description => "Enter add  Tab next field  Esc list",
    }
}
