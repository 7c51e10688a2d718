use serde::{Deserialize, Serialize};

use crate::io::kv::{KeyValueStore, StoreError};
use crate::io::task_store::TaskStore;

/// Store key for the persisted TUI state
pub const UI_STATE_KEY: &str = "ui_state";

/// Persisted TUI state, kept apart from the task list
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Last value of the "only uncompleted tasks" checkbox
    #[serde(default)]
    pub hide_completed: bool,
    /// Cursor position in the task list
    #[serde(default)]
    pub cursor: usize,
}

/// Read the UI state, if any was saved
pub fn read_ui_state<S: KeyValueStore>(store: &TaskStore<S>) -> Option<UiState> {
    store.load_value(UI_STATE_KEY)
}

/// Write the UI state
pub fn write_ui_state<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    state: &UiState,
) -> Result<(), StoreError> {
    store.save_value(UI_STATE_KEY, state)
}
