//! Command implementations for the CLI interface.
//!
//! Each handler works on an open [`Session`], so every change goes through the
//! same validation and write-through path the board UI uses. Output is written
//! to the supplied writer rather than straight to stdout.

use std::io::Write;

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::db::SnapshotStore;
use crate::error::AppError;
use crate::fields::Status;
use crate::seed::seed_board;
use crate::session::{Session, TaskDraft};
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive board (the default).
    Ui,

    /// Add a new task to the To Do column.
    Add {
        /// Short title for the task.
        title: String,
        /// Description shown on the card.
        #[arg(long)]
        desc: String,
        /// Tag label, "General" when omitted.
        #[arg(long)]
        tag: Option<String>,
    },

    /// List tasks grouped by column.
    List {
        /// Only show one column.
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Show a single task by id or title.
    Show {
        /// Task id or title.
        id: String,
    },

    /// Change the text fields of a task. Omitted fields keep their value.
    Edit {
        /// Task id or title.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },

    /// Move a task to another column.
    Move {
        /// Task id or title.
        id: String,
        /// Target column: todo | inprogress | done.
        #[arg(value_enum)]
        status: Status,
    },

    /// Delete a task.
    Delete {
        /// Task id or title.
        id: String,
    },

    /// List distinct tags and counts.
    Tags,

    /// Replace the stored board with the example tasks.
    Reset,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Add a task and print its id.
pub fn cmd_add<S: SnapshotStore>(
    session: &mut Session<S>,
    out: &mut impl Write,
    title: String,
    desc: String,
    tag: Option<String>,
) -> Result<(), AppError> {
    let draft = TaskDraft::new(title, desc, tag.unwrap_or_default());
    let id = session.add(&draft)?;
    ensure_saved(session)?;
    writeln!(out, "Added task {id}")?;
    Ok(())
}

/// Print each column with its tasks in board order.
pub fn cmd_list<S: SnapshotStore>(
    session: &Session<S>,
    out: &mut impl Write,
    status: Option<Status>,
) -> Result<(), AppError> {
    let board = session.board();
    let columns: Vec<Status> = match status {
        Some(s) => vec![s],
        None => Status::ALL.to_vec(),
    };
    for (i, column) in columns.into_iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let tasks = board.list_by_status(column);
        writeln!(out, "{} ({})", column.title(), tasks.len())?;
        if tasks.is_empty() {
            writeln!(out, "  -")?;
            continue;
        }
        writeln!(out, "  {:<14} {:<12} {}", "ID", "Tag", "Title")?;
        for task in tasks {
            writeln!(
                out,
                "  {:<14} {:<12} {}",
                task.id.as_str(),
                truncate(&task.tag, 12),
                task.title
            )?;
        }
    }
    Ok(())
}

/// Print every field of one task.
pub fn cmd_show<S: SnapshotStore>(session: &Session<S>, out: &mut impl Write, id: &str) -> Result<(), AppError> {
    let board = session.board();
    let id = board.resolve(id)?;
    if let Some(task) = board.get(&id) {
        print_task(out, task)?;
    }
    Ok(())
}

/// Apply the given fields on top of the current ones and validate the result.
pub fn cmd_edit<S: SnapshotStore>(
    session: &mut Session<S>,
    out: &mut impl Write,
    id: &str,
    title: Option<String>,
    desc: Option<String>,
    tag: Option<String>,
) -> Result<(), AppError> {
    let id = session.board().resolve(id)?;
    let Some(current) = session.board().get(&id) else {
        return Ok(());
    };
    let mut draft = TaskDraft::from_task(current);
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(desc) = desc {
        draft.description = desc;
    }
    if let Some(tag) = tag {
        draft.tag = tag;
    }
    session.edit(&id, &draft)?;
    ensure_saved(session)?;
    writeln!(out, "Updated task {id}")?;
    Ok(())
}

pub fn cmd_move<S: SnapshotStore>(
    session: &mut Session<S>,
    out: &mut impl Write,
    id: &str,
    status: Status,
) -> Result<(), AppError> {
    let id = session.board().resolve(id)?;
    session.move_task(&id, status);
    ensure_saved(session)?;
    writeln!(out, "Moved task {id} to {}", status.title())?;
    Ok(())
}

pub fn cmd_delete<S: SnapshotStore>(session: &mut Session<S>, out: &mut impl Write, id: &str) -> Result<(), AppError> {
    let id = session.board().resolve(id)?;
    if let Some(task) = session.remove(&id) {
        ensure_saved(session)?;
        writeln!(out, "Deleted task {} ({})", task.id, task.title)?;
    }
    Ok(())
}

/// List all distinct tags with their usage counts.
pub fn cmd_tags<S: SnapshotStore>(session: &Session<S>, out: &mut impl Write) -> Result<(), AppError> {
    writeln!(out, "{:<16} {}", "Tag", "Count")?;
    for (tag, count) in session.board().tags() {
        writeln!(out, "{:<16} {}", truncate(tag, 16), count)?;
    }
    Ok(())
}

/// Overwrite the stored board with the seed tasks.
pub fn cmd_reset<S: SnapshotStore>(session: &mut Session<S>, out: &mut impl Write) -> Result<(), AppError> {
    session.replace_board(seed_board());
    ensure_saved(session)?;
    writeln!(out, "Board reset to {} example tasks", session.board().len())?;
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell, out: &mut impl Write) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, out);
}

/// After the board closes, retry a write that failed while it was open.
pub fn finish_board<S: SnapshotStore>(session: &mut Session<S>) -> Result<(), AppError> {
    if session.save_error().is_some() {
        session.flush().map_err(|e| AppError::NotSaved(e.to_string()))?;
    }
    Ok(())
}

fn ensure_saved<S: SnapshotStore>(session: &Session<S>) -> Result<(), AppError> {
    match session.save_error() {
        Some(e) => Err(AppError::NotSaved(e.to_string())),
        None => Ok(()),
    }
}

fn print_task(out: &mut impl Write, task: &Task) -> std::io::Result<()> {
    writeln!(out, "Task {}: {}", task.id, task.title)?;
    writeln!(out)?;
    writeln!(out, "Status:      {}", task.status.title())?;
    writeln!(out, "Tag:         {} ({})", task.tag, task.tag_color)?;
    writeln!(out)?;
    writeln!(out, "Description:")?;
    writeln!(out, "{}", task.description)
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::BoardError;
    use crate::task::TaskId;

    fn session() -> Session<MemoryStore> {
        Session::open(MemoryStore::default())
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn add_prints_new_id_and_defaults_tag() {
        let mut s = session();
        let mut out = Vec::new();
        cmd_add(&mut s, &mut out, "Write tests".into(), "cover core logic".into(), None).unwrap();

        let added = s.board().tasks().last().unwrap();
        assert_eq!(added.tag, "General");
        assert_eq!(output(out), format!("Added task {}\n", added.id));
    }

    #[test]
    fn finish_board_reports_a_write_that_still_fails() {
        let mut s = Session::open(MemoryStore {
            fail_writes: true,
            ..Default::default()
        });
        finish_board(&mut s).unwrap();

        s.remove(&TaskId::new("1"));
        let err = finish_board(&mut s).unwrap_err();
        assert!(matches!(err, AppError::NotSaved(msg) if msg.contains("quota exceeded")));
        assert_eq!(s.board().len(), 5);
    }

    #[test]
    fn add_with_blank_title_fails() {
        let mut s = session();
        let err = cmd_add(&mut s, &mut Vec::new(), " ".into(), "x".into(), None).unwrap_err();
        assert!(matches!(err, AppError::Board(BoardError::BlankTitle)));
        assert_eq!(s.board().len(), 6);
    }

    #[test]
    fn list_groups_by_column() {
        let s = session();
        let mut out = Vec::new();
        cmd_list(&s, &mut out, None).unwrap();
        let text = output(out);

        let todo = text.find("To Do (2)").unwrap();
        let doing = text.find("In Progress (2)").unwrap();
        let done = text.find("Done (2)").unwrap();
        assert!(todo < doing && doing < done);
        assert!(text.find("Design System Setup").unwrap() < doing);
    }

    #[test]
    fn list_single_column() {
        let s = session();
        let mut out = Vec::new();
        cmd_list(&s, &mut out, Some(Status::Done)).unwrap();
        let text = output(out);
        assert!(text.starts_with("Done (2)"));
        assert!(!text.contains("To Do"));
    }

    #[test]
    fn edit_keeps_unspecified_fields() {
        let mut s = session();
        cmd_edit(&mut s, &mut Vec::new(), "2", None, Some("New text".into()), None).unwrap();
        let task = s.board().get(&TaskId::new("2")).unwrap();
        assert_eq!(task.title, "API Integration");
        assert_eq!(task.description, "New text");
        assert_eq!(task.tag, "Backend");
    }

    #[test]
    fn move_and_delete_resolve_titles() {
        let mut s = session();
        cmd_move(&mut s, &mut Vec::new(), "user dashboard", Status::Done).unwrap();
        assert_eq!(s.board().list_by_status(Status::Done).len(), 3);

        let mut out = Vec::new();
        cmd_delete(&mut s, &mut out, "3").unwrap();
        assert_eq!(output(out), "Deleted task 3 (User Dashboard)\n");
        assert!(matches!(
            cmd_delete(&mut s, &mut Vec::new(), "3"),
            Err(AppError::Board(BoardError::UnknownTask(_)))
        ));
    }

    #[test]
    fn failed_save_is_an_error() {
        let mut s = Session::open(MemoryStore {
            fail_writes: true,
            ..Default::default()
        });
        let err = cmd_move(&mut s, &mut Vec::new(), "1", Status::Done).unwrap_err();
        assert!(matches!(err, AppError::NotSaved(_)));
    }

    #[test]
    fn reset_restores_seed() {
        let mut s = session();
        cmd_delete(&mut s, &mut Vec::new(), "1").unwrap();
        cmd_reset(&mut s, &mut Vec::new()).unwrap();
        assert_eq!(s.board().len(), 6);
    }

    #[test]
    fn show_and_tags_render() {
        let s = session();
        let mut out = Vec::new();
        cmd_show(&s, &mut out, "6").unwrap();
        let text = output(out);
        assert!(text.starts_with("Task 6: Testing Suite"));
        assert!(text.contains("QA (bg-orange-500)"));

        let mut out = Vec::new();
        cmd_tags(&s, &mut out).unwrap();
        assert!(output(out).contains("Backend          2"));
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Frontend", 12), "Frontend");
        assert_eq!(truncate("Infrastructure", 6), "Infra…");
    }
}
