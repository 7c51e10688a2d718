use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::tui::text_input::TextInput;

/// Render the title and description inputs plus the validation line.
pub fn render_form(frame: &mut Frame, app: &App, title_area: Rect, desc_area: Rect, error_area: Rect) {
    render_input(
        frame,
        app,
        &app.title_input,
        " Title ",
        app.focus == Focus::Title,
        title_area,
    );
    render_input(
        frame,
        app,
        &app.description_input,
        " Description ",
        app.focus == Focus::Description,
        desc_area,
    );

    if let Some(ref msg) = app.form_error {
        let line = Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.destructive).bg(app.theme.background),
        ));
        frame.render_widget(Paragraph::new(line), error_area);
    }
}

fn render_input(
    frame: &mut Frame,
    app: &App,
    input: &TextInput,
    label: &str,
    focused: bool,
    area: Rect,
) {
    let bg = app.theme.background;
    let border_color = if focused { app.theme.primary } else { app.theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .title(Span::styled(label.to_string(), Style::default().fg(border_color).bg(bg)));
    let inner = block.inner(area);

    // Keep the cursor inside the box by scrolling long text left
    let cursor_col = input.cursor_col() as u16;
    let scroll_x = (cursor_col + 1).saturating_sub(inner.width);

    let paragraph = Paragraph::new(Span::styled(
        input.text().to_string(),
        Style::default().fg(app.theme.foreground).bg(bg),
    ))
    .block(block)
    .scroll((0, scroll_x));
    frame.render_widget(paragraph, area);

    if focused && !app.show_help && inner.width > 0 && inner.height > 0 {
        frame.set_cursor_position(Position::new(inner.x + cursor_col - scroll_x, inner.y));
    }
}
