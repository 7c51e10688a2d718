use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::cli::output::format_timestamp;
use crate::model::Task;
use crate::tui::app::{App, Focus};
use crate::util::unicode::{display_width, truncate_to_width};

/// The filter checkbox above the list
pub fn render_filter_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mark = if app.manager.hide_completed() { "[x]" } else { "[ ]" };
    let line = Line::from(vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(mark, Style::default().fg(app.theme.primary).bg(bg)),
        Span::styled(" Only uncompleted tasks", Style::default().fg(app.theme.secondary).bg(bg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Rows a task takes: the title line plus one line for a description
fn task_height(task: &Task) -> usize {
    if task.description.is_empty() { 1 } else { 2 }
}

/// Render the derived view, keeping the selected task on screen.
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;
    let width = area.width as usize;

    if let Some(msg) = app.manager.empty_message() {
        let line = Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.muted).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let view = app.manager.view();

    // Line range of the cursor row
    let start: usize = view.iter().take(app.cursor).map(|t| task_height(t)).sum();
    let end = start + view.get(app.cursor).map_or(1, |t| task_height(t));
    let mut scroll = app.scroll_offset;
    if start < scroll {
        scroll = start;
    } else if end > scroll + height {
        scroll = end.saturating_sub(height);
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, task) in view.iter().enumerate() {
        let selected = i == app.cursor && app.focus == Focus::List;
        let row_bg = if selected { app.theme.accent } else { bg };
        let base = Style::default().bg(row_bg);

        let date = format_timestamp(task.created_at_timestamp, &app.date_format);
        let prefix = format!(" {} ", task.checkbox());
        let date_width = display_width(&date) + 1;
        let title_budget = width.saturating_sub(display_width(&prefix) + date_width + 1);
        let title = truncate_to_width(&task.title, title_budget);
        let used = display_width(&prefix) + display_width(&title);
        let padding = width.saturating_sub(used + date_width);

        let mut title_style = base.fg(app.theme.title_color(task.is_done));
        if task.is_done {
            title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
        }
        let check_color = if task.is_done { app.theme.success } else { app.theme.secondary };

        lines.push(Line::from(vec![
            Span::styled(prefix, base.fg(check_color)),
            Span::styled(title, title_style),
            Span::styled(" ".repeat(padding), base),
            Span::styled(format!("{} ", date), base.fg(app.theme.muted)),
        ]));

        if !task.description.is_empty() {
            let first_line = task.description.lines().next().unwrap_or("");
            let desc = truncate_to_width(first_line, width.saturating_sub(5));
            let pad = width.saturating_sub(4 + display_width(&desc));
            lines.push(Line::from(vec![
                Span::styled("    ", base),
                Span::styled(desc, base.fg(app.theme.muted)),
                Span::styled(" ".repeat(pad), base),
            ]));
        }
    }

    app.scroll_offset = scroll;
    let visible: Vec<Line> = lines.into_iter().skip(scroll).take(height).collect();
    frame.render_widget(Paragraph::new(visible).style(Style::default().bg(bg)), area);
}
