//! Interaction state for the terminal UI
//!
//! This is purely local input state (selected option, typed answer, status
//! message). Study progress lives in the flow.

use crate::view::{AnswerInput, SectionView, ViewBody};

/// How key presses are interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate and select
    #[default]
    Navigate,
    /// Keys edit the typed answer
    TextEntry,
}

impl InputMode {
    /// Mode appropriate for a view: typing only while a free-text question awaits an answer
    pub fn for_view(view: &SectionView) -> Self {
        match &view.body {
            ViewBody::Question(q) if q.feedback.is_none() && q.input == AnswerInput::FreeText => {
                InputMode::TextEntry
            }
            _ => InputMode::Navigate,
        }
    }
}

/// A single-line answer being typed
#[derive(Debug, Clone, Default)]
pub struct AnswerDraft {
    /// Input buffer
    pub input: String,
    /// Cursor position (character index)
    pub cursor: usize,
}

impl AnswerDraft {
    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    /// Get the number of characters in input
    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Whether there is anything besides whitespace to submit
    pub fn is_blank(&self) -> bool {
        self.input.trim().is_empty()
    }

    /// Take the typed text, leaving the draft empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.input)
    }
}

/// Local UI state of the study screen
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Highlighted multiple-choice option
    pub selected_option: usize,
    /// Typed short answer
    pub draft: AnswerDraft,
    /// Status/error message for the status line
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
}

impl InteractionState {
    /// Move the option highlight up, stopping at the first option
    pub fn select_previous(&mut self) {
        self.selected_option = self.selected_option.saturating_sub(1);
    }

    /// Move the option highlight down, stopping at the last of `count` options
    pub fn select_next(&mut self, count: usize) {
        if self.selected_option + 1 < count {
            self.selected_option += 1;
        }
    }

    /// Forget per-question input
    pub fn reset_question(&mut self) {
        self.selected_option = 0;
        self.draft = AnswerDraft::default();
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
        self.is_error = false;
    }
}
