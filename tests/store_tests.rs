use std::time::{Duration, Instant};
use todust::models::{RestoreSource, Task, MAX_TEXT_LEN};
use todust::store::{TaskStore, COMPLETE_GRACE};

fn add(store: &mut TaskStore, text: &str) -> u64 {
    store.set_input(text);
    store.add_task().expect("task should be added")
}

#[test]
fn test_blank_input_is_noop() {
    let mut store = TaskStore::new();
    store.set_input("   ");
    assert_eq!(store.add_task(), None);
    assert!(store.tasks.is_empty());

    store.set_input("");
    assert_eq!(store.add_task(), None);
    assert!(store.tasks.is_empty());
}

#[test]
fn test_add_task() {
    let mut store = TaskStore::new();
    add(&mut store, "Buy milk");

    let incomplete = store.incomplete_tasks();
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].text, "Buy milk");
    assert!(!incomplete[0].completed);
    assert!(!incomplete[0].temporarily_completed);
    // Input line is cleared after a successful add
    assert!(store.input_value.is_empty());
}

#[test]
fn test_input_respects_character_cap() {
    let mut store = TaskStore::new();
    let long: String = "x".repeat(MAX_TEXT_LEN + 10);
    store.set_input(&long);
    assert_eq!(store.input_value.chars().count(), MAX_TEXT_LEN);

    store.push_input('y');
    assert_eq!(store.input_value.chars().count(), MAX_TEXT_LEN);

    store.pop_input();
    store.push_input('y');
    assert!(store.input_value.ends_with('y'));
}

#[test]
fn test_delete_moves_task_unmodified() {
    let mut store = TaskStore::new();
    let a = add(&mut store, "A");
    let b = add(&mut store, "B");
    let before: Task = store.tasks[0].clone();

    assert!(store.delete_task(a));
    assert_eq!(store.tasks.len(), 1);
    assert_eq!(store.tasks[0].id, b);
    assert_eq!(store.deleted_tasks.len(), 1);
    // Moved by value, flags and all
    assert_eq!(store.deleted_tasks[0], before);
    // Total count is conserved
    assert_eq!(store.tasks.len() + store.deleted_tasks.len(), 2);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut store = TaskStore::new();
    add(&mut store, "A");
    assert!(!store.delete_task(999));
    assert_eq!(store.tasks.len(), 1);
    assert!(store.deleted_tasks.is_empty());
}

#[test]
fn test_toggle_complete_commits_after_grace() {
    let mut store = TaskStore::new();
    let id = add(&mut store, "C");
    let now = Instant::now();

    assert!(store.toggle_complete(id, now));
    // Immediately marked, not yet committed
    assert!(store.tasks[0].temporarily_completed);
    assert!(!store.tasks[0].completed);

    // Before the deadline nothing moves
    assert!(!store.fire_due(now + Duration::from_millis(500)));
    assert!(store.completed_tasks().is_empty());

    // Past the deadline the task commits and moves to the completed view
    assert!(store.fire_due(now + COMPLETE_GRACE));
    let completed = store.completed_tasks();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, id);
    assert!(completed[0].completed);
    assert!(!completed[0].temporarily_completed);
    assert!(store.incomplete_tasks().is_empty());
}

#[test]
fn test_committed_task_moves_to_end() {
    let mut store = TaskStore::new();
    let a = add(&mut store, "A");
    let b = add(&mut store, "B");
    let now = Instant::now();

    store.toggle_complete(a, now);
    store.fire_due(now + COMPLETE_GRACE);

    assert_eq!(store.tasks[0].id, b);
    assert_eq!(store.tasks[1].id, a);
    assert!(store.tasks[1].completed);
}

#[test]
fn test_delete_cancels_pending_completion() {
    let mut store = TaskStore::new();
    let id = add(&mut store, "A");
    let now = Instant::now();

    store.toggle_complete(id, now);
    assert!(store.delete_task(id));

    // The stale timer must not resurrect the deleted task
    assert!(!store.fire_due(now + COMPLETE_GRACE));
    assert!(store.tasks.is_empty());
    assert_eq!(store.deleted_tasks.len(), 1);
    assert!(!store.deleted_tasks[0].completed);
}

#[test]
fn test_restore_cancels_pending_completion() {
    let mut store = TaskStore::new();
    let id = add(&mut store, "A");
    let now = Instant::now();

    store.toggle_complete(id, now);
    assert!(store.restore_task(id, RestoreSource::Completed));

    assert!(!store.fire_due(now + COMPLETE_GRACE));
    assert_eq!(store.tasks.len(), 1);
    assert!(!store.tasks[0].completed);
    assert!(!store.tasks[0].temporarily_completed);
}

#[test]
fn test_restore_from_deleted_resets_flags() {
    let mut store = TaskStore::new();
    let mut task = Task::new(7, "stale".into());
    task.completed = true;
    task.temporarily_completed = true;
    store.deleted_tasks.push(task);

    assert!(store.restore_task(7, RestoreSource::Deleted));
    assert!(store.deleted_tasks.is_empty());
    assert_eq!(store.tasks.len(), 1);
    assert!(!store.tasks[0].completed);
    assert!(!store.tasks[0].temporarily_completed);
}

#[test]
fn test_restore_unknown_id_is_noop() {
    let mut store = TaskStore::new();
    assert!(!store.restore_task(1, RestoreSource::Completed));
    assert!(!store.restore_task(1, RestoreSource::Deleted));
}

#[test]
fn test_delete_from_completed_keeps_flag() {
    let mut store = TaskStore::new();
    let id = add(&mut store, "A");
    let now = Instant::now();
    store.toggle_complete(id, now);
    store.fire_due(now + COMPLETE_GRACE);

    assert!(store.delete_from_completed(id));
    assert_eq!(store.deleted_tasks.len(), 1);
    // The completed flag travels along unchanged
    assert!(store.deleted_tasks[0].completed);
}

#[test]
fn test_visibility_toggles() {
    let mut store = TaskStore::new();
    assert!(!store.show_completed);
    assert!(!store.show_deleted);
    store.toggle_show_completed();
    store.toggle_show_deleted();
    assert!(store.show_completed);
    assert!(store.show_deleted);
    store.toggle_show_completed();
    assert!(!store.show_completed);
    assert!(store.show_deleted);
}

#[test]
fn test_scenario_add_add_delete() {
    let mut store = TaskStore::new();
    let a = add(&mut store, "A");
    let b = add(&mut store, "B");

    store.delete_task(a);

    assert_eq!(store.tasks.len(), 1);
    assert_eq!(store.tasks[0].id, b);
    assert_eq!(store.tasks[0].text, "B");
    assert_eq!(store.deleted_tasks.len(), 1);
    assert_eq!(store.deleted_tasks[0].text, "A");
}

#[test]
fn test_scenario_complete_after_wait() {
    let mut store = TaskStore::new();
    let c = add(&mut store, "C");
    let now = Instant::now();

    store.toggle_complete(c, now);
    store.fire_due(now + COMPLETE_GRACE + Duration::from_secs(1));

    let completed = store.completed_tasks();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].text, "C");
    assert!(store.incomplete_tasks().is_empty());
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let mut store = TaskStore::new();
    let a = add(&mut store, "A");
    let b = add(&mut store, "B");
    store.delete_task(a);
    let c = add(&mut store, "C");
    assert!(b > a);
    assert!(c > b);
}
