pub mod app;
pub mod ui;

use std::io;
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use app::{App, InputMode};
use ui::ui;

/// How long the event loop sleeps waiting for input before ticking.
const TICK_RATE: Duration = Duration::from_millis(200);

pub fn run_tui() -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            disable_raw_mode()?;
            execute!(
                terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            )?;
            terminal.show_cursor()?;
            return Err(e);
        }
    };

    // Run loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        // Commit any delayed completions whose 2-second pause has elapsed.
        app.tick(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        // Wake up early if a delayed completion comes due before the tick.
        let timeout = app
            .store
            .next_due()
            .map(|due| due.saturating_duration_since(Instant::now()).min(TICK_RATE))
            .unwrap_or(TICK_RATE);
        if !event::poll(timeout)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::Tab => app.focus_next(),
                    KeyCode::Char(' ') => app.complete_selected(),
                    KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                    KeyCode::Char('r') => app.restore_selected(),
                    KeyCode::Char('c') => app.toggle_completed_panel(),
                    KeyCode::Char('v') => app.toggle_deleted_panel(),
                    KeyCode::Char('a') => app.start_input(),
                    _ => {}
                },
                InputMode::Editing => match key.code {
                    KeyCode::Enter => app.submit_input(),
                    KeyCode::Esc => app.cancel_input(),
                    KeyCode::Char(c) => app.store.push_input(c),
                    KeyCode::Backspace => app.store.pop_input(),
                    _ => {}
                },
            }
        }
    }
}
