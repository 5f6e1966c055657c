use std::io;
use std::time::Instant;
use ratatui::widgets::ListState;
use crate::models::RestoreSource;
use crate::store::TaskStore;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// The three list panels of the single view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Active,
    Completed,
    Deleted,
}

pub struct App {
    pub store: TaskStore,
    pub input_mode: InputMode,
    pub focus: Panel,
    pub active_state: ListState,
    pub completed_state: ListState,
    pub deleted_state: ListState,
}

impl App {
    /// Creates the app and loads initial data from storage.
    pub fn new() -> io::Result<App> {
        let store = TaskStore::load()?;
        let mut active_state = ListState::default();
        if !store.incomplete_tasks().is_empty() {
            active_state.select(Some(0));
        }
        Ok(App {
            store,
            input_mode: InputMode::Normal,
            focus: Panel::Active,
            active_state,
            completed_state: ListState::default(),
            deleted_state: ListState::default(),
        })
    }

    /// Commits due delayed completions and persists if anything moved.
    pub fn tick(&mut self, now: Instant) {
        if self.store.fire_due(now) {
            self.store.persist();
            self.reclamp();
        }
    }

    fn panel_len(&self, panel: Panel) -> usize {
        match panel {
            Panel::Active => self.store.incomplete_tasks().len(),
            Panel::Completed => self.store.completed_tasks().len(),
            Panel::Deleted => self.store.deleted_tasks.len(),
        }
    }

    fn panel_state(&mut self, panel: Panel) -> &mut ListState {
        match panel {
            Panel::Active => &mut self.active_state,
            Panel::Completed => &mut self.completed_state,
            Panel::Deleted => &mut self.deleted_state,
        }
    }

    /// Selects the next item in the focused panel, wrapping around.
    pub fn next(&mut self) {
        let len = self.panel_len(self.focus);
        if len == 0 {
            return;
        }
        let state = self.panel_state(self.focus);
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    /// Selects the previous item in the focused panel, wrapping around.
    pub fn previous(&mut self) {
        let len = self.panel_len(self.focus);
        if len == 0 {
            return;
        }
        let state = self.panel_state(self.focus);
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    /// Moves focus to the next visible panel.
    pub fn focus_next(&mut self) {
        let order = [Panel::Active, Panel::Completed, Panel::Deleted];
        let pos = order.iter().position(|p| *p == self.focus).unwrap_or(0);
        for offset in 1..=order.len() {
            let candidate = order[(pos + offset) % order.len()];
            if self.panel_visible(candidate) {
                self.focus = candidate;
                if self.panel_state(candidate).selected().is_none() && self.panel_len(candidate) > 0 {
                    self.panel_state(candidate).select(Some(0));
                }
                return;
            }
        }
    }

    fn panel_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Active => true,
            Panel::Completed => self.store.show_completed,
            Panel::Deleted => self.store.show_deleted,
        }
    }

    /// The id of the selected task in the focused panel, if any.
    fn selected_id(&mut self) -> Option<u64> {
        let selected = self.panel_state(self.focus).selected()?;
        let id = match self.focus {
            Panel::Active => self.store.incomplete_tasks().get(selected).map(|t| t.id),
            Panel::Completed => self.store.completed_tasks().get(selected).map(|t| t.id),
            Panel::Deleted => self.store.deleted_tasks.get(selected).map(|t| t.id),
        };
        id
    }

    /// Marks the selected active task as done, starting the 2-second pause.
    pub fn complete_selected(&mut self) {
        if self.focus != Panel::Active {
            return;
        }
        if let Some(id) = self.selected_id() {
            if self.store.toggle_complete(id, Instant::now()) {
                self.store.persist();
            }
        }
    }

    /// Deletes the selected task (active or completed panel).
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let moved = match self.focus {
            Panel::Active => self.store.delete_task(id),
            Panel::Completed => self.store.delete_from_completed(id),
            Panel::Deleted => false,
        };
        if moved {
            self.store.persist();
            self.reclamp();
        }
    }

    /// Restores the selected task (completed or deleted panel).
    pub fn restore_selected(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let moved = match self.focus {
            Panel::Completed => self.store.restore_task(id, RestoreSource::Completed),
            Panel::Deleted => self.store.restore_task(id, RestoreSource::Deleted),
            Panel::Active => false,
        };
        if moved {
            self.store.persist();
            self.reclamp();
        }
    }

    /// Shows or hides the completed panel.
    pub fn toggle_completed_panel(&mut self) {
        self.store.toggle_show_completed();
        self.ensure_focus_visible();
    }

    /// Shows or hides the deleted panel.
    pub fn toggle_deleted_panel(&mut self) {
        self.store.toggle_show_deleted();
        self.ensure_focus_visible();
    }

    fn ensure_focus_visible(&mut self) {
        if !self.panel_visible(self.focus) {
            self.focus = Panel::Active;
        }
    }

    /// Switches to the input line.
    pub fn start_input(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    /// Adds a task from the input line; a blank line just leaves input mode.
    pub fn submit_input(&mut self) {
        if self.store.add_task().is_some() {
            self.store.persist();
            self.reclamp();
        }
        self.input_mode = InputMode::Normal;
    }

    /// Leaves input mode, discarding the input line.
    pub fn cancel_input(&mut self) {
        self.store.set_input("");
        self.input_mode = InputMode::Normal;
    }

    /// Clamps every panel's selection to its current length.
    fn reclamp(&mut self) {
        for panel in [Panel::Active, Panel::Completed, Panel::Deleted] {
            let len = self.panel_len(panel);
            let state = self.panel_state(panel);
            match state.selected() {
                Some(_) if len == 0 => state.select(None),
                Some(i) if i >= len => state.select(Some(len - 1)),
                None if len > 0 => state.select(Some(0)),
                _ => {}
            }
        }
    }
}
