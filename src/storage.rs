use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use crate::models::Task;

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `TODUST_DB` environment variable.
/// 2. `~/.local/share/todust/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
fn db_path() -> PathBuf {
    std::env::var("TODUST_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("todust");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("tasks.json");
        p
    })
}

/// Returns the path to the deleted-tasks database file (`deleted_tasks.json`).
///
/// Located in the same directory as the tasks database.
fn deleted_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("deleted_tasks.json");
    p
}

/// Loads the active task list from the storage file.
///
/// A missing file yields an empty list. An unreadable or malformed file is an
/// error: this is the strict load performed once at startup.
pub fn load_tasks() -> io::Result<Vec<Task>> {
    let path = db_path();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut f = OpenOptions::new().read(true).open(&path)?;
    let mut s = String::new();
    f.read_to_string(&mut s)?;
    serde_json::from_str(&s).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Loads the deleted task list from the storage file.
///
/// Unlike [`load_tasks`], every failure here is caught, logged to stderr, and
/// replaced with an empty list.
pub fn load_deleted_tasks() -> Vec<Task> {
    let path = deleted_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading deleted tasks from {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    let mut s = String::new();
    if let Err(e) = f.read_to_string(&mut s) {
        eprintln!("Error loading deleted tasks from {}: {}", path.display(), e);
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|e| {
        eprintln!("Error parsing deleted tasks from {}: {}", path.display(), e);
        Vec::new()
    })
}

/// Saves the given active task list to the storage file.
///
/// Overwrites the existing file.
pub fn save_tasks(tasks: &[Task]) -> io::Result<()> {
    write_list(db_path(), tasks)
}

/// Saves the given deleted task list to the storage file.
pub fn save_deleted_tasks(tasks: &[Task]) -> io::Result<()> {
    write_list(deleted_path(), tasks)
}

fn write_list(path: PathBuf, tasks: &[Task]) -> io::Result<()> {
    let s = serde_json::to_string_pretty(tasks)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Deletes the tasks and deleted-tasks database files.
pub fn delete_database() -> io::Result<()> {
    let t_path = db_path();
    if t_path.exists() {
        fs::remove_file(t_path)?;
    }
    let d_path = deleted_path();
    if d_path.exists() {
        fs::remove_file(d_path)?;
    }
    Ok(())
}
