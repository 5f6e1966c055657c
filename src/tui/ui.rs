use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use crate::models::{Task, MAX_TEXT_LEN};
use super::app::{App, InputMode, Panel};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Lists
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    // Input line
    let input_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::Gray),
    };
    let input_title = format!(
        "Add a new task ({}/{})",
        app.store.input_value.chars().count(),
        MAX_TEXT_LEN
    );
    let input = Paragraph::new(app.store.input_value.as_str())
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(input_title));
    f.render_widget(input, chunks[0]);
    if app.input_mode == InputMode::Editing {
        let x = chunks[0].x + 1 + app.store.input_value.chars().count() as u16;
        f.set_cursor_position((x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
    }

    // Lists: active on the left, completed/deleted stacked on the right
    let side_panels = app.store.show_completed || app.store.show_deleted;
    let list_area = if side_panels {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(chunks[1]);

        let mut side = Vec::new();
        if app.store.show_completed {
            side.push(Constraint::Percentage(if app.store.show_deleted { 50 } else { 100 }));
        }
        if app.store.show_deleted {
            side.push(Constraint::Percentage(if app.store.show_completed { 50 } else { 100 }));
        }
        let side_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(side)
            .split(split[1]);

        let mut idx = 0;
        if app.store.show_completed {
            render_completed(f, app, side_chunks[idx]);
            idx += 1;
        }
        if app.store.show_deleted {
            render_deleted(f, app, side_chunks[idx]);
        }
        split[0]
    } else {
        chunks[1]
    };

    let items: Vec<ListItem> = app
        .store
        .incomplete_tasks()
        .iter()
        .map(|t| active_item(t))
        .collect();
    let list = List::new(items)
        .block(panel_block("Do This!!", app.focus == Panel::Active))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, list_area, &mut app.active_state);

    // Help bar
    let help_text = match app.input_mode {
        InputMode::Normal => {
            "q: Quit | a: Add | Space: Done | d: Del | r: Restore | c: Completed | v: Deleted | Tab: Panel | j/k: Move"
        }
        InputMode::Editing => "Enter: Add Task | Esc: Cancel",
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn active_item(task: &Task) -> ListItem<'static> {
    if task.temporarily_completed {
        ListItem::new(format!("[x] {}", task.text))
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::CROSSED_OUT))
    } else {
        ListItem::new(format!("[ ] {}", task.text))
    }
}

fn render_completed(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    let items: Vec<ListItem> = app
        .store
        .completed_tasks()
        .iter()
        .map(|t| {
            ListItem::new(t.text.clone())
                .style(Style::default().fg(Color::Green).add_modifier(Modifier::CROSSED_OUT))
        })
        .collect();
    let list = List::new(items)
        .block(panel_block("Completed Tasks", app.focus == Panel::Completed))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, &mut app.completed_state);
}

fn render_deleted(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    let items: Vec<ListItem> = app
        .store
        .deleted_tasks
        .iter()
        .map(|t| ListItem::new(t.text.clone()).style(Style::default().fg(Color::Red)))
        .collect();
    let list = List::new(items)
        .block(panel_block("Deleted Tasks", app.focus == Panel::Deleted))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, area, &mut app.deleted_state);
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).title(title).border_style(style)
}
