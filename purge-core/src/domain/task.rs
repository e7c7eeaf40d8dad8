//! Task domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an asynchronous task spawned on the server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskRef(pub String);

impl TaskRef {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn href(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form error payload Pulp attaches to failed tasks
pub type TaskError = serde_json::Value;

/// Task record as reported by the server
///
/// Only `pulp_href` and `state` are required; the remaining fields are
/// informational and may be absent depending on how far the task got.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub pulp_href: String,
    pub state: TaskState,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<TaskError>,
}

impl Task {
    /// Wall-clock runtime, if the server reported both ends
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

/// Task execution state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Waiting,
    Skipped,
    Running,
    Completed,
    Failed,
    Canceled,
    Canceling,
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Whether the task is still queued or executing
    ///
    /// Only `waiting` and `running` count; any other state ends a poll loop.
    pub fn is_pending(self) -> bool {
        matches!(self, TaskState::Waiting | TaskState::Running)
    }

    pub fn is_success(self) -> bool {
        self == TaskState::Completed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Waiting => "waiting",
            TaskState::Skipped => "skipped",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Canceled => "canceled",
            TaskState::Canceling => "canceling",
            TaskState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
