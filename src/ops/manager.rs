use crate::io::kv::KeyValueStore;
use crate::io::task_store::TaskStore;
use crate::model::list::TaskList;
use crate::model::task::{Task, TaskId};
use crate::ops::task_ops::{self, ValidationError};
use crate::ops::view;

type Subscriber = Box<dyn FnMut(&TaskList)>;

/// Owns the task list, runs every mutation and mirrors the list to a store.
///
/// All operations are synchronous. After a change that touches the tasks
/// the full list is saved; a failed save is logged and remembered in
/// [`last_store_error`](Self::last_store_error) but the in-memory change
/// stays. Subscribers are called after every state change, filter
/// included.
pub struct TaskListManager<S: KeyValueStore> {
    list: TaskList,
    store: TaskStore<S>,
    subscribers: Vec<Subscriber>,
    last_store_error: Option<String>,
}

impl<S: KeyValueStore> TaskListManager<S> {
    /// A manager with an empty list. Call [`initialize`](Self::initialize)
    /// to pick up what the store holds.
    pub fn new(store: TaskStore<S>) -> Self {
        TaskListManager {
            list: TaskList::default(),
            store,
            subscribers: Vec::new(),
            last_store_error: None,
        }
    }

    /// Load the stored list. An empty result keeps the current list.
    pub fn initialize(&mut self) {
        let saved = self.store.load();
        if saved.is_empty() {
            return;
        }
        tracing::debug!(count = saved.len(), "loaded tasks");
        self.list.tasks = saved;
        self.notify();
    }

    /// Create a task stamped with the current time.
    pub fn create(&mut self, title: &str, description: &str) -> Result<TaskId, ValidationError> {
        self.create_at(title, description, task_ops::now_timestamp())
    }

    /// Create a task with an explicit creation timestamp (seconds).
    pub fn create_at(
        &mut self,
        title: &str,
        description: &str,
        created_at: i64,
    ) -> Result<TaskId, ValidationError> {
        let id = task_ops::create_task(&mut self.list, title, description, created_at)?;
        tracing::debug!(id, "task created");
        self.persist();
        self.notify();
        Ok(id)
    }

    /// Set the done flag of a task. Unknown IDs are ignored.
    pub fn toggle_status(&mut self, id: TaskId, is_done: bool) {
        if task_ops::toggle_status(&mut self.list, id, is_done) {
            tracing::debug!(id, is_done, "task status changed");
            self.persist();
            self.notify();
        }
    }

    /// Remove a task. Unknown IDs are ignored.
    pub fn delete(&mut self, id: TaskId) {
        if let Some(task) = task_ops::delete_task(&mut self.list, id) {
            tracing::debug!(id, "task deleted");
            self.store.log_deletion(&task);
            self.persist();
            self.notify();
        }
    }

    pub fn set_filter(&mut self, hide_completed: bool) {
        task_ops::set_filter(&mut self.list, hide_completed);
        self.notify();
    }

    /// The display list, recomputed from the current state on every call.
    pub fn view(&self) -> Vec<&Task> {
        view::list_view(&self.list)
    }

    /// Placeholder text when [`view`](Self::view) is empty
    pub fn empty_message(&self) -> Option<&'static str> {
        view::empty_message(self.list.len(), self.view().len())
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&mut self, callback: impl FnMut(&TaskList) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn hide_completed(&self) -> bool {
        self.list.show_only_uncompleted_tasks
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore<S> {
        &mut self.store
    }

    /// Message of the most recent failed save, if it has not been cleared
    pub fn last_store_error(&self) -> Option<&str> {
        self.last_store_error.as_deref()
    }

    pub fn clear_store_error(&mut self) {
        self.last_store_error = None;
    }

    fn persist(&mut self) {
        match self.store.save(&self.list.tasks) {
            Ok(()) => self.last_store_error = None,
            Err(e) => {
                tracing::warn!(key = self.store.key(), "could not save tasks: {}", e);
                self.last_store_error = Some(e.to_string());
            }
        }
    }

    fn notify(&mut self) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::{MemoryStore, StoreError};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn manager() -> TaskListManager<MemoryStore> {
        TaskListManager::new(TaskStore::new(MemoryStore::new(), "tasks"))
    }

    /// Persisted content decoded back into tasks
    fn persisted<S: KeyValueStore>(m: &TaskListManager<S>) -> Vec<Task> {
        m.store().load()
    }

    fn ids<S: KeyValueStore>(m: &TaskListManager<S>) -> HashSet<TaskId> {
        m.list().tasks.iter().map(|t| t.id).collect()
    }

    /// Store whose writes always fail
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write {
                path: PathBuf::from("/readonly/tasks.json"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_initialize_loads_saved_tasks() {
        let mut store = TaskStore::new(MemoryStore::new(), "tasks");
        store
            .save(&[Task::new(4, "Saved".into(), String::new(), 10)])
            .unwrap();
        let mut m = TaskListManager::new(store);
        m.initialize();
        assert_eq!(m.list().len(), 1);
        assert_eq!(m.list().tasks[0].title, "Saved");
    }

    #[test]
    fn test_initialize_with_empty_store_keeps_list() {
        let mut m = manager();
        m.initialize();
        assert!(m.list().is_empty());
    }

    #[test]
    fn test_create_persists_and_returns_id() {
        let mut m = manager();
        assert_eq!(m.create_at("a", "x", 100), Ok(1));
        assert_eq!(m.create_at("b", "", 200), Ok(2));
        assert_eq!(persisted(&m), m.list().tasks);
        assert!(m.list().tasks.iter().all(|t| !t.is_done));
    }

    #[test]
    fn test_create_uses_current_time() {
        let mut m = manager();
        let before = task_ops::now_timestamp();
        m.create("now", "").unwrap();
        let after = task_ops::now_timestamp();
        let ts = m.list().tasks[0].created_at_timestamp;
        assert!(before <= ts && ts <= after);
    }

    #[test]
    fn test_create_rejects_invalid_titles() {
        let mut m = manager();
        m.create_at("keep", "", 1).unwrap();
        assert_eq!(m.create_at("", "x", 2), Err(ValidationError::EmptyTitle));
        assert_eq!(
            m.create_at(" a", "x", 2),
            Err(ValidationError::TitleHasLeadingOrTrailingSpace)
        );
        assert_eq!(
            m.create_at("a ", "x", 2),
            Err(ValidationError::TitleHasLeadingOrTrailingSpace)
        );
        assert_eq!(m.list().len(), 1);
        assert_eq!(persisted(&m).len(), 1);
    }

    #[test]
    fn test_toggle_twice_stays_done() {
        let mut m = manager();
        let id = m.create_at("a", "", 1).unwrap();
        m.toggle_status(id, true);
        m.toggle_status(id, true);
        assert_eq!(m.list().len(), 1);
        assert!(m.list().find(id).unwrap().is_done);
        assert_eq!(persisted(&m), m.list().tasks);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut m = manager();
        for (i, title) in ["one", "two", "three"].iter().enumerate() {
            m.create_at(title, "", i as i64).unwrap();
        }
        m.delete(2);
        assert_eq!(ids(&m), HashSet::from([1, 3]));
        assert_eq!(persisted(&m), m.list().tasks);

        m.delete(99);
        assert_eq!(ids(&m), HashSet::from([1, 3]));
    }

    #[test]
    fn test_view_follows_filter() {
        let mut m = manager();
        let a = m.create_at("A", "", 3).unwrap();
        let b = m.create_at("B", "", 1).unwrap();
        let c = m.create_at("C", "", 2).unwrap();
        m.toggle_status(b, true);

        let order: Vec<TaskId> = m.view().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![a, c, b]);

        m.set_filter(true);
        assert!(m.hide_completed());
        let order: Vec<TaskId> = m.view().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn test_empty_message() {
        let mut m = manager();
        assert_eq!(m.empty_message(), Some(view::NO_TASKS));
        let id = m.create_at("a", "", 1).unwrap();
        assert_eq!(m.empty_message(), None);
        m.toggle_status(id, true);
        m.set_filter(true);
        assert_eq!(m.empty_message(), Some(view::NO_TASKS_WITH_FILTER));
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let mut m = manager();
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = Rc::clone(&seen);
        m.subscribe(move |list| sink.borrow_mut().push(list.len()));

        let id = m.create_at("a", "", 1).unwrap();
        m.toggle_status(id, true);
        m.toggle_status(id, true); // no change, no call
        m.set_filter(true);
        m.delete(id);
        m.delete(id); // already gone
        assert!(m.create_at("", "", 2).is_err());

        assert_eq!(*seen.borrow(), vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_failed_save_keeps_new_state() {
        let mut m = TaskListManager::new(TaskStore::new(ReadOnlyStore::default(), "tasks"));
        let id = m.create_at("a", "", 1).unwrap();
        assert_eq!(m.list().len(), 1);
        assert!(m.last_store_error().unwrap().contains("read-only"));

        m.toggle_status(id, true);
        assert!(m.list().find(id).unwrap().is_done);

        m.clear_store_error();
        assert!(m.last_store_error().is_none());
    }

    #[test]
    fn test_filter_does_not_persist() {
        let mut m = manager();
        m.set_filter(true);
        assert!(m.store().kv().get("tasks").unwrap().is_none());
    }
}
