pub mod manager;
pub mod task_ops;
pub mod view;

pub use manager::TaskListManager;
