use std::io::{self, Write};
use std::time::Instant;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use crate::models::{RestoreSource, Task, MAX_TEXT_LEN};
use crate::storage::delete_database;
use crate::store::{TaskStore, COMPLETE_GRACE};

fn load_store(silent: bool) -> Option<TaskStore> {
    match TaskStore::load() {
        Ok(store) => Some(store),
        Err(e) => {
            if !silent { eprintln!("Failed to load tasks: {}", e); }
            None
        }
    }
}

/// Adds a new task to the database.
///
/// Text is truncated to the 50-character cap; blank or whitespace-only text
/// is rejected.
pub fn cmd_add(text: String, silent: bool) {
    let Some(mut store) = load_store(silent) else { return };
    if text.chars().count() > MAX_TEXT_LEN && !silent {
        eprintln!("Task text truncated to {} characters.", MAX_TEXT_LEN);
    }
    store.set_input(&text);
    match store.add_task() {
        Some(id) => {
            store.persist();
            if !silent { println!("Task added (id = {})", id); }
        }
        None => {
            if !silent { eprintln!("Task text must not be blank."); }
        }
    }
}

/// Marks a task as complete by ID.
///
/// The interactive view shows a 2-second strike-through pause before the
/// completion commits; a one-shot command has nowhere to show it, so the
/// commit happens immediately.
pub fn cmd_complete(id: u64, silent: bool) {
    let Some(mut store) = load_store(silent) else { return };
    let now = Instant::now();
    if !store.toggle_complete(id, now) {
        if !silent { eprintln!("Task {} not found.", id); }
        return;
    }
    store.fire_due(now + COMPLETE_GRACE);
    store.persist();
    if !silent { println!("Task {} marked as complete.", id); }
}

/// Moves a task from the active list to the deleted list.
pub fn cmd_delete(id: u64, silent: bool) {
    let Some(mut store) = load_store(silent) else { return };
    if store.delete_task(id) {
        store.persist();
        if !silent { println!("Task {} deleted.", id); }
    } else {
        if !silent { eprintln!("Task {} not found.", id); }
    }
}

/// Restores a task from the completed section or the deleted list back to
/// the active list.
pub fn cmd_restore(id: u64, from: RestoreSource, silent: bool) {
    let Some(mut store) = load_store(silent) else { return };
    if store.restore_task(id, from) {
        store.persist();
        if !silent { println!("Task {} restored.", id); }
    } else {
        if !silent { eprintln!("Task {} not found.", id); }
    }
}

/// Lists tasks in a formatted table.
///
/// By default shows the incomplete view; `completed` and `deleted` select
/// the other two views.
pub fn cmd_list(completed: bool, deleted: bool) {
    let Some(store) = load_store(false) else { return };

    let (title, rows): (&str, Vec<&Task>) = if deleted {
        ("Deleted", store.deleted_tasks.iter().collect())
    } else if completed {
        ("Completed", store.completed_tasks())
    } else {
        ("To do", store.incomplete_tasks())
    };

    if rows.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for t in rows {
        let status = if t.completed {
            "Done"
        } else if t.temporarily_completed {
            "Completing"
        } else {
            "Pending"
        };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.text),
            Cell::new(&t.created_at),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{} tasks:", title);
    println!("{table}");
}

/// Resets the database by deleting all tasks and deleted tasks.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
