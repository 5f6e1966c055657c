use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use todust::store::{TaskStore, COMPLETE_GRACE};

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(test_name: &str, f: F)
where
    F: FnOnce(PathBuf),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let mut dir = env::temp_dir();
    dir.push(format!("todust_storage_test_{}", test_name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let mut db_path = dir.clone();
    db_path.push("tasks.json");

    // Set env var
    env::set_var("TODUST_DB", db_path.to_str().unwrap());

    // Run test
    f(db_path);

    // Clean up after test
    let _ = fs::remove_dir_all(&dir);
    env::remove_var("TODUST_DB");
}

#[test]
fn test_missing_files_load_empty() {
    with_test_db("missing", |_path| {
        let store = TaskStore::load().unwrap();
        assert!(store.tasks.is_empty());
        assert!(store.deleted_tasks.is_empty());
    });
}

#[test]
fn test_round_trip() {
    with_test_db("round_trip", |_path| {
        let mut store = TaskStore::new();
        store.set_input("Buy milk");
        store.add_task().unwrap();
        store.set_input("Walk the dog");
        let dog = store.add_task().unwrap();
        store.set_input("Old chore");
        let chore = store.add_task().unwrap();

        let now = Instant::now();
        store.toggle_complete(dog, now);
        store.fire_due(now + COMPLETE_GRACE);
        store.delete_task(chore);
        store.persist();

        let reloaded = TaskStore::load().unwrap();
        assert_eq!(reloaded.tasks, store.tasks);
        assert_eq!(reloaded.deleted_tasks, store.deleted_tasks);
    });
}

#[test]
fn test_next_id_seeded_from_both_collections() {
    with_test_db("next_id", |_path| {
        let mut store = TaskStore::new();
        store.set_input("A");
        store.add_task().unwrap();
        store.set_input("B");
        let b = store.add_task().unwrap();
        // The highest id ends up in the deleted list
        store.delete_task(b);
        store.persist();

        let mut reloaded = TaskStore::load().unwrap();
        reloaded.set_input("C");
        let c = reloaded.add_task().unwrap();
        assert!(c > b);
    });
}

#[test]
fn test_malformed_tasks_is_a_load_error() {
    with_test_db("malformed_tasks", |path| {
        fs::write(&path, "not json").unwrap();
        assert!(TaskStore::load().is_err());
    });
}

#[test]
fn test_malformed_deleted_falls_back_to_empty() {
    with_test_db("malformed_deleted", |path| {
        let mut store = TaskStore::new();
        store.set_input("A");
        store.add_task().unwrap();
        store.persist();

        let mut deleted_path = path.clone();
        deleted_path.pop();
        deleted_path.push("deleted_tasks.json");
        fs::write(&deleted_path, "not json").unwrap();

        let reloaded = TaskStore::load().unwrap();
        assert_eq!(reloaded.tasks.len(), 1);
        assert!(reloaded.deleted_tasks.is_empty());
    });
}
