//! # Todust
//!
//! A small terminal to-do list written in Rust. Todust pairs a quick CLI for
//! scripted use with a TUI (Terminal User Interface) showing the whole list
//! on one screen.
//!
//! ## Features
//!
//! *   **Three lists, one screen**: active tasks, a completed section, and a
//!     deleted list with restore.
//! *   **Delayed completion**: marking a task done strikes it through for a
//!     2-second pause before it moves to the completed section.
//! *   **Restore anywhere**: completed and deleted tasks can be restored back
//!     to the active list.
//! *   **Data Persistence**: tasks are stored in standard XDG data
//!     directories (JSON format) and survive restarts.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Simply run the command without arguments to launch the interactive UI:
//!
//! ```bash
//! todust
//! # or explicitly
//! todust ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `q`: Quit
//! *   `a`: Edit the input line (`Enter` adds, `Esc` cancels)
//! *   `j`/`k` or arrows: Select
//! *   `Tab`: Cycle between visible panels
//! *   `Space`: Mark the selected active task as done
//! *   `d`: Delete the selected task (active or completed panel)
//! *   `r`: Restore the selected task (completed or deleted panel)
//! *   `c`: Show/hide the completed panel
//! *   `v`: Show/hide the deleted panel
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # Add a task (at most 50 characters)
//! todust add "Buy milk"
//!
//! # List tasks
//! todust list
//! todust list --completed
//! todust list --deleted
//!
//! # Complete, delete, restore
//! todust complete <ID>
//! todust delete <ID>
//! todust restore <ID> --from deleted
//! todust restore <ID> --from completed
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/todust/tasks.json`
//! *   macOS: `~/Library/Application Support/todust/tasks.json`
//! *   Windows: `%APPDATA%\todust\tasks.json`
//!
//! Deleted tasks live in `deleted_tasks.json` next to it. You can override
//! the location by setting the `TODUST_DB` environment variable.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use todust::commands::*;
use todust::models::RestoreSource;
use todust::tui::run_tui;

#[derive(Parser)]
#[command(name = "todust")]
#[command(about = "Simple terminal to-do list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task text (quoted if it has spaces, at most 50 characters)
        text: String,
    },
    /// List tasks
    List {
        /// Show the completed section instead of the to-do list
        #[arg(short, long)]
        completed: bool,
        /// Show the deleted list instead of the to-do list
        #[arg(short, long)]
        deleted: bool,
    },
    /// Mark a task as complete
    Complete {
        id: u64,
    },
    /// Move a task to the deleted list
    Delete {
        id: u64,
    },
    /// Restore a task to the active list
    Restore {
        id: u64,
        /// Where to restore from (completed, deleted)
        #[arg(short, long)]
        from: String,
    },
    /// Reset the database (delete all tasks)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { text }) => cmd_add(text, false),
        Some(Commands::List { completed, deleted }) => cmd_list(completed, deleted),
        Some(Commands::Complete { id }) => cmd_complete(id, false),
        Some(Commands::Delete { id }) => cmd_delete(id, false),
        Some(Commands::Restore { id, from }) => {
            let source = match from.as_str() {
                "completed" => RestoreSource::Completed,
                "deleted" => RestoreSource::Deleted,
                _ => {
                    eprintln!("Unknown source: {}. Use 'completed' or 'deleted'.", from);
                    return;
                }
            };
            cmd_restore(id, source, false)
        }
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "todust", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
