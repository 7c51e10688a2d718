use std::path::Path;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::kv::FileStore;
use crate::io::task_store::TaskStore;
use crate::model::UiConfig;
use crate::ops::TaskListManager;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen at the default test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// An app over a file store in `dir`, loading whatever is already there
pub fn app_in_dir(dir: &Path) -> App {
    let store = TaskStore::new(FileStore::new(dir), "tasks");
    let mut manager = TaskListManager::new(store);
    manager.initialize();
    App::new(manager, &UiConfig::default())
}

/// An app with no tasks in a fresh temp dir
pub fn empty_app() -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let app = app_in_dir(tmp.path());
    (tmp, app)
}

/// An app holding `(title, created_at, is_done)` tasks, IDs assigned from 1
/// in the given order.
pub fn app_with_tasks(tasks: &[(&str, i64, bool)]) -> (TempDir, App) {
    let (tmp, mut app) = empty_app();
    for &(title, created_at, is_done) in tasks {
        let id = app.manager.create_at(title, "", created_at).unwrap();
        if is_done {
            app.manager.toggle_status(id, true);
        }
    }
    app.sync_after_change();
    app.focus = crate::tui::app::Focus::List;
    (tmp, app)
}
