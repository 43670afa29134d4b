//! Enumerations for TUI state management.

/// Which screen has the keyboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Board,
    AddTask,
    EditTask,
    Help,
}
