use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::kv::FileStore;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::task_store::TaskStore;
use crate::model::{Config, TaskId, UiConfig};
use crate::ops::TaskListManager;

use super::input;
use super::render;
use super::text_input::TextInput;
use super::theme::Theme;

/// Which widget receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Title,
    Description,
}

/// Main application state
pub struct App {
    pub manager: TaskListManager<FileStore>,
    pub focus: Focus,
    pub title_input: TextInput,
    pub description_input: TextInput,
    /// Validation message shown under the form
    pub form_error: Option<String>,
    /// Index into the derived view
    pub cursor: usize,
    /// First visible line of the task list
    pub scroll_offset: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub theme: Theme,
    pub date_format: String,
    pub show_key_hints: bool,
    /// Set by the manager subscription whenever the list or filter changes
    changed: Rc<Cell<bool>>,
}

impl App {
    pub fn new(mut manager: TaskListManager<FileStore>, ui: &UiConfig) -> Self {
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        manager.subscribe(move |_| flag.set(true));
        manager.set_filter(ui.hide_completed);

        App {
            manager,
            focus: Focus::Title,
            title_input: TextInput::default(),
            description_input: TextInput::default(),
            form_error: None,
            cursor: 0,
            scroll_offset: 0,
            show_help: false,
            should_quit: false,
            theme: Theme::from_config(ui),
            date_format: ui.date_format.clone(),
            show_key_hints: ui.show_key_hints,
            changed,
        }
    }

    /// IDs of the derived view, in display order
    pub fn view_ids(&self) -> Vec<TaskId> {
        self.manager.view().iter().map(|t| t.id).collect()
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.view_ids().get(self.cursor).copied()
    }

    /// Re-derive cursor bounds if the manager reported a change since last call.
    pub fn sync_after_change(&mut self) {
        if self.changed.replace(false) {
            self.clamp_cursor();
        }
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.manager.view().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.manager.view().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Create a task from the form. On success the inputs clear, the new
    /// task is selected and the title input keeps focus.
    pub fn submit_form(&mut self) {
        let title = self.title_input.text().to_string();
        let description = self.description_input.text().to_string();
        match self.manager.create(&title, &description) {
            Ok(id) => {
                self.title_input.clear();
                self.description_input.clear();
                self.form_error = None;
                self.focus = Focus::Title;
                if let Some(pos) = self.view_ids().iter().position(|&v| v == id) {
                    self.cursor = pos;
                }
            }
            Err(e) => self.form_error = Some(e.to_string()),
        }
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let is_done = self.manager.list().find(id).is_some_and(|t| t.is_done);
        self.manager.toggle_status(id, !is_done);
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.manager.delete(id);
        }
    }

    pub fn toggle_filter(&mut self) {
        let hide = !self.manager.hide_completed();
        self.manager.set_filter(hide);
    }

    /// Move focus Title → Description → List → Title
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Title => Focus::Description,
            Focus::Description => Focus::List,
            Focus::List => Focus::Title,
        };
    }
}

pub fn run(config: Config, data_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::new(FileStore::new(&data_dir), config.store.key.clone());
    let mut manager = TaskListManager::new(store);
    manager.initialize();

    let mut app = App::new(manager, &config.ui);
    restore_ui_state(&mut app);
    tracing::info!(data_dir = %data_dir.display(), tasks = app.manager.list().len(), "tui started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal if anything panics
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|frame| render::render(frame, app))?;
            needs_redraw = false;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    needs_redraw = true;
                }
                Event::Paste(text) => {
                    input::handle_paste(app, &text);
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Apply the filter and cursor saved by the previous session
pub fn restore_ui_state(app: &mut App) {
    let Some(ui_state) = read_ui_state(app.manager.store()) else {
        return;
    };
    app.manager.set_filter(ui_state.hide_completed);
    app.cursor = ui_state.cursor;
    app.clamp_cursor();
    app.changed.set(false);
}

pub fn save_ui_state(app: &mut App) {
    let state = UiState {
        hide_completed: app.manager.hide_completed(),
        cursor: app.cursor,
    };
    if let Err(e) = write_ui_state(app.manager.store_mut(), &state) {
        tracing::warn!("could not save ui state: {}", e);
    }
}
