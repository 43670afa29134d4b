//! Single-line text input used by the task forms.

/// A text input with a cursor measured in characters, not bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Input pre-filled with `value`, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character under the cursor.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}
