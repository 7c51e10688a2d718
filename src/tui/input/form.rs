use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};
use crate::tui::text_input::TextInput;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.submit_form();
            return;
        }
        KeyCode::Esc => {
            app.focus = Focus::List;
            return;
        }
        KeyCode::Tab => {
            app.cycle_focus();
            return;
        }
        KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Description => Focus::Title,
                _ => Focus::List,
            };
            return;
        }
        _ => {}
    }

    let input = match app.focus {
        Focus::Title => &mut app.title_input,
        Focus::Description => &mut app.description_input,
        Focus::List => return,
    };
    edit_input(input, key);
}

fn edit_input(input: &mut TextInput, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => input.home(),
        KeyCode::Char('e') if ctrl => input.end(),
        KeyCode::Char('u') if ctrl => input.clear(),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
}
