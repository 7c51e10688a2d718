use crate::model::list::TaskList;
use crate::model::task::Task;

/// Message shown when nothing is listed at all
pub const NO_TASKS: &str = "You have no tasks";
/// Message shown when tasks exist but the filter hides all of them
pub const NO_TASKS_WITH_FILTER: &str = "You have no tasks with this filter";

/// Compute the display order for a task list.
///
/// Newest first. With `hide_completed` only undone tasks remain; otherwise
/// undone tasks come before done ones, each group still newest first.
/// Both sorts are stable, so tasks with equal timestamps keep list order.
pub fn derive_view(tasks: &[Task], hide_completed: bool) -> Vec<&Task> {
    let mut view: Vec<&Task> = tasks.iter().collect();
    view.sort_by(|a, b| b.created_at_timestamp.cmp(&a.created_at_timestamp));

    if hide_completed {
        view.retain(|t| !t.is_done);
    } else {
        view.sort_by_key(|t| t.is_done);
    }
    view
}

/// Derived view of a list using its own filter flag
pub fn list_view(list: &TaskList) -> Vec<&Task> {
    derive_view(&list.tasks, list.show_only_uncompleted_tasks)
}

/// The placeholder text for an empty view, or None if the view has rows.
pub fn empty_message(total: usize, visible: usize) -> Option<&'static str> {
    match (total, visible) {
        (0, _) => Some(NO_TASKS),
        (_, 0) => Some(NO_TASKS_WITH_FILTER),
        _ => None,
    }
}
