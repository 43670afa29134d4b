//! Board TUI entry point and terminal setup.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::db::SnapshotStore;
use crate::session::Session;
use crate::tui::app::BoardApp;

/// Take over the terminal, run the board until the user quits, then restore it.
/// The session is handed back so the caller can report a pending save failure.
pub fn run_board_tui<S: SnapshotStore>(session: Session<S>) -> io::Result<Session<S>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(tasks = session.board().len(), "opening board");
    let mut app = BoardApp::new(session);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result?;
    Ok(app.into_session())
}
