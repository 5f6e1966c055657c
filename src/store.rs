use std::io;
use std::time::{Duration, Instant};
use crate::models::{RestoreSource, Task, MAX_TEXT_LEN};
use crate::storage::{load_deleted_tasks, load_tasks, save_deleted_tasks, save_tasks};

/// Delay between marking a task complete and committing the completion.
pub const COMPLETE_GRACE: Duration = Duration::from_secs(2);

/// A completion scheduled to commit once its deadline passes.
///
/// Keyed by task id; cancelled when the task is deleted or restored before
/// the deadline, so a stale entry can never resurrect a removed task.
#[derive(Debug, Clone, Copy)]
struct PendingCompletion {
    task_id: u64,
    due: Instant,
}

/// Owns the full application state: the active and deleted task lists, the
/// input line being edited, the visibility toggles, and the schedule of
/// deferred completions.
///
/// Every transition is a plain method; the CLI and TUI are thin callers that
/// invoke [`TaskStore::persist`] after each change.
pub struct TaskStore {
    pub tasks: Vec<Task>,
    pub deleted_tasks: Vec<Task>,
    pub input_value: String,
    pub show_completed: bool,
    pub show_deleted: bool,
    next_id: u64,
    pending: Vec<PendingCompletion>,
}

impl TaskStore {
    /// Creates an empty store.
    pub fn new() -> TaskStore {
        TaskStore {
            tasks: Vec::new(),
            deleted_tasks: Vec::new(),
            input_value: String::new(),
            show_completed: false,
            show_deleted: false,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Loads a store from the database files.
    ///
    /// A malformed active-tasks file is a startup error; a malformed
    /// deleted-tasks file falls back to empty (logged by the storage layer).
    pub fn load() -> io::Result<TaskStore> {
        let tasks = load_tasks()?;
        let deleted_tasks = load_deleted_tasks();
        let next_id = tasks
            .iter()
            .chain(deleted_tasks.iter())
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            + 1;
        Ok(TaskStore {
            tasks,
            deleted_tasks,
            input_value: String::new(),
            show_completed: false,
            show_deleted: false,
            next_id,
            pending: Vec::new(),
        })
    }

    /// Writes both collections back to the database files.
    ///
    /// Write failures are logged; the in-memory state change stands either
    /// way. The two files are written independently, not transactionally.
    pub fn persist(&self) {
        if let Err(e) = save_tasks(&self.tasks) {
            eprintln!("Error saving tasks: {}", e);
        }
        if let Err(e) = save_deleted_tasks(&self.deleted_tasks) {
            eprintln!("Error saving deleted tasks: {}", e);
        }
    }

    /// Appends a new task built from the current input line, then clears it.
    ///
    /// No-op on blank or whitespace-only input. Returns the new task's id,
    /// or `None` if nothing was added.
    pub fn add_task(&mut self) -> Option<u64> {
        if self.input_value.trim().is_empty() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        let text = std::mem::take(&mut self.input_value);
        self.tasks.push(Task::new(id, text));
        Some(id)
    }

    /// Moves a task unmodified from the active list to the deleted list.
    ///
    /// Cancels any pending completion for that task. No-op if the id is not
    /// found.
    pub fn delete_task(&mut self, id: u64) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.cancel_pending(id);
        let task = self.tasks.remove(pos);
        self.deleted_tasks.push(task);
        true
    }

    /// Deletes a task out of the completed section.
    ///
    /// Same mechanics as [`TaskStore::delete_task`]: the task moves to the
    /// deleted list with its `completed` flag intact.
    pub fn delete_from_completed(&mut self, id: u64) -> bool {
        self.delete_task(id)
    }

    /// Marks a task as temporarily completed and schedules the commit for
    /// `now + COMPLETE_GRACE`.
    ///
    /// The commit itself happens in [`TaskStore::fire_due`]. No-op if the id
    /// is not found in the active list.
    pub fn toggle_complete(&mut self, id: u64, now: Instant) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.temporarily_completed = true;
        self.cancel_pending(id);
        self.pending.push(PendingCompletion {
            task_id: id,
            due: now + COMPLETE_GRACE,
        });
        true
    }

    /// Commits every scheduled completion whose deadline has passed.
    ///
    /// A due task still present in the active list is moved to the end with
    /// `completed=true, temporarily_completed=false`. A due entry whose task
    /// is gone is dropped without effect. Returns whether any task changed,
    /// so callers know to persist.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        let mut changed = false;
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due > now {
                i += 1;
                continue;
            }
            let entry = self.pending.remove(i);
            if let Some(pos) = self.tasks.iter().position(|t| t.id == entry.task_id) {
                let mut task = self.tasks.remove(pos);
                task.completed = true;
                task.temporarily_completed = false;
                self.tasks.push(task);
                changed = true;
            }
        }
        changed
    }

    /// Returns the deadline of the next scheduled completion, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Restores a task from the completed section or the deleted list back
    /// to the active list, resetting both flags.
    ///
    /// Cancels any pending completion for that task. No-op if the id is not
    /// found in the named collection.
    pub fn restore_task(&mut self, id: u64, from: RestoreSource) -> bool {
        let source = match from {
            RestoreSource::Completed => &mut self.tasks,
            RestoreSource::Deleted => &mut self.deleted_tasks,
        };
        let Some(pos) = source.iter().position(|t| t.id == id) else {
            return false;
        };
        let mut task = source.remove(pos);
        task.completed = false;
        task.temporarily_completed = false;
        self.cancel_pending(id);
        self.tasks.push(task);
        true
    }

    /// Incomplete tasks in the active list, in insertion order.
    pub fn incomplete_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    /// Completed tasks still in the active list, in completion order.
    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }

    /// Toggles the completed panel's visibility. Purely presentational.
    pub fn toggle_show_completed(&mut self) {
        self.show_completed = !self.show_completed;
    }

    /// Toggles the deleted panel's visibility. Purely presentational.
    pub fn toggle_show_deleted(&mut self) {
        self.show_deleted = !self.show_deleted;
    }

    /// Replaces the input line, truncated to the character cap.
    pub fn set_input(&mut self, value: &str) {
        self.input_value = value.chars().take(MAX_TEXT_LEN).collect();
    }

    /// Appends a character to the input line; no-op once the cap is reached.
    pub fn push_input(&mut self, c: char) {
        if self.input_value.chars().count() < MAX_TEXT_LEN {
            self.input_value.push(c);
        }
    }

    /// Removes the last character of the input line.
    pub fn pop_input(&mut self) {
        self.input_value.pop();
    }

    fn cancel_pending(&mut self, id: u64) {
        self.pending.retain(|p| p.task_id != id);
    }
}

impl Default for TaskStore {
    fn default() -> TaskStore {
        TaskStore::new()
    }
}
