mod form;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Focus};

use form::handle_form;
use navigate::handle_navigate;

/// Handle a key event for whichever widget has focus
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay intercepts ? and Esc, swallows everything else
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match app.focus {
        Focus::List => handle_navigate(app, key),
        Focus::Title | Focus::Description => handle_form(app, key),
    }
    app.sync_after_change();
}

/// Handle a bracketed paste event. Only the focused form field takes it;
/// newlines become spaces since both fields are single-line.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() || app.show_help {
        return;
    }
    let clean: String = text
        .chars()
        .filter(|c| *c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    match app.focus {
        Focus::Title => app.title_input.insert_str(&clean),
        Focus::Description => app.description_input.insert_str(&clean),
        Focus::List => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    pub(super) fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    pub(super) fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn help_swallows_keys() {
        let (_tmp, mut app) = app_with_tasks(&[("A", 1, false)]);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.manager.list().len(), 1);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn paste_into_title_flattens_newlines() {
        let (_tmp, mut app) = empty_app();
        handle_paste(&mut app, "line one\r\nline two");
        assert_eq!(app.title_input.text(), "line one line two");
    }

    #[test]
    fn paste_ignored_in_list() {
        let (_tmp, mut app) = app_with_tasks(&[("A", 1, false)]);
        handle_paste(&mut app, "text");
        assert_eq!(app.title_input.text(), "");
    }

    #[test]
    fn add_then_toggle_then_delete() {
        let (_tmp, mut app) = empty_app();
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.manager.list().len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.manager.list().tasks[0].is_done);

        press(&mut app, KeyCode::Char('d'));
        assert!(app.manager.list().is_empty());
        assert_eq!(app.cursor, 0);
    }
}
