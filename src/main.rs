//! # kanban
//!
//! A three-column kanban board (To Do, In Progress, Done) for the terminal.
//!
//! Running `kanban` with no arguments opens the interactive board. Cards are
//! moved by picking them up with the keyboard or dragging them with the mouse,
//! and each change is written straight back to a JSON file.
//! The same board can be driven from scripts through subcommands:
//!
//! ```bash
//! kanban add "Write release notes" --desc "Summarise changes since 0.1" --tag Docs
//! kanban list --status todo
//! kanban move "Write release notes" inprogress
//! kanban delete 1718000000000
//! ```
//!
//! The board lives in `~/.kanban/kanban-tasks.json` unless `--db` or
//! `KANBAN_DB` points elsewhere. A missing or unreadable file starts the
//! board from a small set of example tasks. Logs from the interactive board
//! go to `kanban.log` next to the board file; subcommands log to stderr.
//! `RUST_LOG` overrides the level chosen with `-v`/`-q`.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use tracing::{debug, error};

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod fields;
pub mod seed;
pub mod session;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
}

use cli::{init_tracing, Cli};
use cmd::*;
use config::Config;
use db::FileStore;
use error::AppError;
use session::Session;
use tui::run::run_board_tui;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    // Completions need neither the data directory nor a board.
    if let Some(Commands::Completions { shell }) = &cli.command {
        cmd_completions(*shell, &mut io::stdout());
        return Ok(());
    }

    let config = Config::resolve(&cli)?;
    let command = cli.command.unwrap_or(Commands::Ui);
    let interactive = matches!(command, Commands::Ui);
    init_tracing(config.log_level, interactive.then_some(config.log_path.as_path()))?;

    let store = FileStore::new(&config.db_path);
    debug!(path = %store.path().display(), "using board file");
    let mut session = Session::open(store);

    let mut out = io::stdout().lock();
    match command {
        Commands::Ui => {
            let mut session = run_board_tui(session)?;
            finish_board(&mut session)
        }
        Commands::Add { title, desc, tag } => cmd_add(&mut session, &mut out, title, desc, tag),
        Commands::List { status } => cmd_list(&session, &mut out, status),
        Commands::Show { id } => cmd_show(&session, &mut out, &id),
        Commands::Edit { id, title, desc, tag } => cmd_edit(&mut session, &mut out, &id, title, desc, tag),
        Commands::Move { id, status } => cmd_move(&mut session, &mut out, &id, status),
        Commands::Delete { id } => cmd_delete(&mut session, &mut out, &id),
        Commands::Tags => cmd_tags(&session, &mut out),
        Commands::Reset => cmd_reset(&mut session, &mut out),
        Commands::Completions { .. } => Ok(()),
    }?;
    out.flush()?;
    Ok(())
}
