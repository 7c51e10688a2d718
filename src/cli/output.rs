use std::fmt::Write;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::model::task::{Task, TaskId};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    pub id: TaskId,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub created_at_timestamp: i64,
    pub is_done: bool,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub hide_done: bool,
    pub total: usize,
    pub remaining: usize,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct CreatedJson {
    pub id: TaskId,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        created_at_timestamp: task.created_at_timestamp,
        is_done: task.is_done,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a creation timestamp in local time. Out-of-range values and
/// formats chrono rejects print the raw number.
pub fn format_timestamp(timestamp: i64, format: &str) -> String {
    let Some(dt) = Local.timestamp_opt(timestamp, 0).single() else {
        return timestamp.to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", dt.format(format)) {
        Ok(()) => out,
        Err(_) => timestamp.to_string(),
    }
}

/// One-line summary: `[x] #3 Title (date)`
pub fn format_task_line(task: &Task, date_format: &str) -> String {
    format!(
        "{} #{} {} ({})",
        task.checkbox(),
        task.id,
        task.title,
        format_timestamp(task.created_at_timestamp, date_format)
    )
}

/// Task line followed by its description, indented
pub fn format_task_block(task: &Task, date_format: &str) -> Vec<String> {
    let mut lines = vec![format_task_line(task, date_format)];
    for line in task.description.lines() {
        lines.push(format!("    {}", line));
    }
    lines
}
