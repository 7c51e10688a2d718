use serde::{Deserialize, Serialize};

/// Task identifier. Unique among the tasks currently held in a list.
pub type TaskId = u64;

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Never empty, never padded with whitespace (checked at creation)
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Seconds since the Unix epoch
    pub created_at_timestamp: i64,
    #[serde(default)]
    pub is_done: bool,
}

impl Task {
    /// Create a new, not-yet-done task
    pub fn new(id: TaskId, title: String, description: String, created_at_timestamp: i64) -> Self {
        Task {
            id,
            title,
            description,
            created_at_timestamp,
            is_done: false,
        }
    }

    /// The checkbox shown in front of the title: `[ ]` or `[x]`
    pub fn checkbox(&self) -> &'static str {
        if self.is_done { "[x]" } else { "[ ]" }
    }
}
