use chrono::Local;
use serde::{Deserialize, Serialize};

/// Maximum length of a task's text, in characters.
///
/// Enforced at the input layer (TUI input line and CLI `add`), not by the
/// store itself.
pub const MAX_TEXT_LEN: usize = 50;

/// Represents a single task in the to-do list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: u64,
    /// The task text (at most [`MAX_TEXT_LEN`] characters).
    pub text: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Transient visual state between the complete action and its commit.
    #[serde(default)]
    pub temporarily_completed: bool,
    /// Timestamp when the task was created (ISO 8601).
    #[serde(default)]
    pub created_at: String,
}

impl Task {
    /// Creates a new incomplete task with the given id and text.
    pub fn new(id: u64, text: String) -> Task {
        Task {
            id,
            text,
            completed: false,
            temporarily_completed: false,
            created_at: Local::now().to_rfc3339(),
        }
    }
}

/// Which collection a task is restored from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
    /// The completed section of the main list.
    Completed,
    /// The deleted list.
    Deleted,
}
