use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cmd::Commands;
use crate::error::AppError;

/// File-backed three-column kanban board.
/// Storage defaults to ~/.kanban/kanban-tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "kanban", version, about = "Three-column kanban board for the terminal")]
pub struct Cli {
    /// Path to the JSON board file.
    #[arg(long, global = true, env = "KANBAN_DB")]
    pub db: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (-q warnings only, -qq errors only).
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Opens the board when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Level used when RUST_LOG is not set.
pub fn default_log_level(verbose: u8, quiet: u8) -> &'static str {
    match (verbose, quiet) {
        (_, q) if q >= 2 => "error",
        (_, 1) => "warn",
        (v, _) if v >= 3 => "trace",
        (2, _) => "debug",
        (1, _) => "info",
        _ => "warn",
    }
}

/// Install the global subscriber. With `log_file` set, output is appended to
/// that file instead of stderr so it never lands on the board's screen.
pub fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logging(format!("invalid RUST_LOG / log filter: {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true);

    let init_result = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::Logging(format!("cannot open {}: {e}", path.display())))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, "warn")]
    #[case(1, 0, "info")]
    #[case(2, 0, "debug")]
    #[case(5, 0, "trace")]
    #[case(0, 1, "warn")]
    #[case(0, 2, "error")]
    fn verbosity_maps_to_level(#[case] verbose: u8, #[case] quiet: u8, #[case] expected: &str) {
        assert_eq!(default_log_level(verbose, quiet), expected);
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["kanban", "--db", "/tmp/board.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.db.as_deref(), Some(Path::new("/tmp/board.json")));
    }
}
