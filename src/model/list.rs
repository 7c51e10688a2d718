use super::task::{Task, TaskId};

/// The authoritative list of tasks plus the active filter flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    /// Insertion order carries no meaning; display order comes from the derived view
    pub tasks: Vec<Task>,
    /// Hide completed tasks from the derived view
    pub show_only_uncompleted_tasks: bool,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskList {
            tasks,
            show_only_uncompleted_tasks: false,
        }
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet done
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_done).count()
    }
}
