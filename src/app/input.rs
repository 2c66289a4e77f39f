//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

use super::state::InputMode;

/// Actions that can be taken on the study screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Back,
    Forward,
    Up,
    Down,

    // Selection
    Confirm,

    // Answer editing
    Char(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,

    Quit,
}

/// Navigation-mode key mapping
///
/// Arrow keys always work; `h`/`j`/`k`/`l` only with vim mode.
pub fn navigate_key_to_action(key: KeyCode, vim_mode: bool) -> Option<Action> {
    match key {
        KeyCode::Left => Some(Action::Back),
        KeyCode::Right => Some(Action::Forward),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Char('h') if vim_mode => Some(Action::Back),
        KeyCode::Char('l') if vim_mode => Some(Action::Forward),
        KeyCode::Char('k') if vim_mode => Some(Action::Up),
        KeyCode::Char('j') if vim_mode => Some(Action::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Confirm),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Text-entry key mapping: printable keys are typed, not interpreted
pub fn text_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(c) => Some(Action::Char(c)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorStart),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping with modifiers and input mode
pub fn key_to_action(
    key: KeyCode,
    modifiers: KeyModifiers,
    mode: InputMode,
    vim_mode: bool,
) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('a') if mode == InputMode::TextEntry => Some(Action::CursorStart),
            KeyCode::Char('e') if mode == InputMode::TextEntry => Some(Action::CursorEnd),
            _ => None,
        };
    }

    match mode {
        InputMode::Navigate => navigate_key_to_action(key, vim_mode),
        InputMode::TextEntry => text_key_to_action(key),
    }
}
