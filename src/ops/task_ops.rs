use chrono::Utc;

use crate::model::list::TaskList;
use crate::model::task::{Task, TaskId};

/// Why a new task was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title must not be empty string")]
    EmptyTitle,
    #[error("Title must not begin or end with a space")]
    TitleHasLeadingOrTrailingSpace,
}

// ---------------------------------------------------------------------------
// Validation and identity
// ---------------------------------------------------------------------------

/// Check a title before creating a task. The empty check wins.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.trim() != title {
        return Err(ValidationError::TitleHasLeadingOrTrailingSpace);
    }
    Ok(())
}

/// Next free id: 1 for an empty list, otherwise the highest id plus one.
///
/// Deleting the highest-id task makes its id available again. When stored
/// data already holds `u64::MAX` the lowest unused id is taken instead.
pub fn next_task_id(tasks: &[Task]) -> TaskId {
    let Some(max) = tasks.iter().map(|t| t.id).max() else {
        return 1;
    };
    max.checked_add(1).unwrap_or_else(|| lowest_free_id(tasks))
}

/// Smallest id from 1 up that no task holds
fn lowest_free_id(tasks: &[Task]) -> TaskId {
    let mut ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    ids.dedup();
    let mut candidate = 1;
    for id in ids {
        if id > candidate {
            break;
        }
        if id == candidate {
            candidate += 1;
        }
    }
    candidate
}

/// Current time in whole seconds since the epoch
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Validate and append a new task created at `created_at`.
/// Returns the assigned ID; the list is untouched on error.
pub fn create_task(
    list: &mut TaskList,
    title: &str,
    description: &str,
    created_at: i64,
) -> Result<TaskId, ValidationError> {
    validate_title(title)?;
    let id = next_task_id(&list.tasks);
    list.tasks.push(Task::new(
        id,
        title.to_string(),
        description.to_string(),
        created_at,
    ));
    Ok(id)
}

/// Set the done flag of a task. Returns whether anything changed;
/// an unknown ID is ignored.
pub fn toggle_status(list: &mut TaskList, id: TaskId, is_done: bool) -> bool {
    match list.find_mut(id) {
        Some(task) if task.is_done != is_done => {
            task.is_done = is_done;
            true
        }
        _ => false,
    }
}

/// Remove a task, returning it. An unknown ID is ignored.
pub fn delete_task(list: &mut TaskList, id: TaskId) -> Option<Task> {
    let pos = list.tasks.iter().position(|t| t.id == id)?;
    Some(list.tasks.remove(pos))
}

pub fn set_filter(list: &mut TaskList, hide_completed: bool) {
    list.show_only_uncompleted_tasks = hide_completed;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
