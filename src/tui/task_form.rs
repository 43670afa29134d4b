//! Task form handling for the terminal user interface.
//!
//! The same three-field form backs both the add dialog and the edit dialog.
//! It converts to and from a [`TaskDraft`]; validation is left to the board.

use crossterm::event::KeyCode;

use crate::session::TaskDraft;
use crate::tui::input::InputField;

/// Field order within the form.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const TAG_FIELD: usize = 2;
const FIELD_COUNT: usize = 3;

/// What a key press asks the owner of the form to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

#[derive(Clone, Debug, Default)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub tag: InputField,
    pub current_field: usize,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_draft(draft: &TaskDraft) -> Self {
        Self {
            title: InputField::with_value(&draft.title),
            description: InputField::with_value(&draft.description),
            tag: InputField::with_value(&draft.tag),
            current_field: TITLE_FIELD,
        }
    }

    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft::new(
            self.title.value.clone(),
            self.description.value.clone(),
            self.tag.value.clone(),
        )
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.tag.clear();
        self.current_field = TITLE_FIELD;
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    fn current_input(&mut self) -> &mut InputField {
        match self.current_field {
            TITLE_FIELD => &mut self.title,
            DESCRIPTION_FIELD => &mut self.description,
            _ => &mut self.tag,
        }
    }

    /// Apply a key to the focused field.
    pub fn handle_key(&mut self, key: KeyCode) -> FormAction {
        match key {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Char(c) => self.current_input().handle_char(c),
            KeyCode::Backspace => self.current_input().handle_backspace(),
            KeyCode::Delete => self.current_input().handle_delete(),
            KeyCode::Left => self.current_input().move_cursor_left(),
            KeyCode::Right => self.current_input().move_cursor_right(),
            KeyCode::Home => self.current_input().move_home(),
            KeyCode::End => self.current_input().move_end(),
            _ => {}
        }
        FormAction::None
    }
}
