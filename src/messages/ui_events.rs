//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::BodyKind;

/// Which key map is active (derived from the frontmost element)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Form {
        multiline: bool,
    },
    Checklist,
    Confirm,
    Alert,
    Help,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Navigation
    Up,
    Down,
    FocusLeft,
    FocusRight,
    NextTab,
    PrevTab,
    Activate,
    Back,

    // Form editing
    NextField,
    PrevField,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    Newline,
    Submit,
    ToggleSignUp,

    // Entity actions
    New,
    Edit,
    Delete,
    EditLinks,
    NewBody(BodyKind),
    Reload,
    Logout,

    // Popups
    Confirm,
    Dismiss,
    ToggleHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, mode: InputMode) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') if matches!(mode, InputMode::Form { .. } | InputMode::Checklist) => {
                return Some(UiEvent::Submit)
            }
            _ => {}
        }
    }

    match mode {
        InputMode::Alert => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(UiEvent::Dismiss),
            _ => None,
        },
        InputMode::Help => Some(UiEvent::ToggleHelp),
        InputMode::Confirm => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Some(UiEvent::Confirm),
            KeyCode::Char('n') | KeyCode::Esc => Some(UiEvent::Back),
            _ => None,
        },
        InputMode::Checklist => match key.code {
            KeyCode::Esc => Some(UiEvent::Back),
            KeyCode::Up => Some(UiEvent::Up),
            KeyCode::Down => Some(UiEvent::Down),
            KeyCode::Char(' ') => Some(UiEvent::Activate),
            KeyCode::Enter => Some(UiEvent::Submit),
            _ => None,
        },
        InputMode::Form { multiline } => handle_form_keys(key, multiline),
        InputMode::Normal => handle_normal_keys(key),
    }
}

fn handle_form_keys(key: KeyEvent, multiline: bool) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::Back),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::F(2) => Some(UiEvent::ToggleSignUp),
        KeyCode::Enter if multiline => Some(UiEvent::Newline),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_normal_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::FocusLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::FocusRight),
        KeyCode::Tab => Some(UiEvent::NextTab),
        KeyCode::BackTab => Some(UiEvent::PrevTab),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::Activate),
        KeyCode::Esc | KeyCode::Backspace => Some(UiEvent::Back),
        KeyCode::Char('n') => Some(UiEvent::New),
        KeyCode::Char('e') => Some(UiEvent::Edit),
        KeyCode::Char('d') => Some(UiEvent::Delete),
        KeyCode::Char('p') => Some(UiEvent::EditLinks),
        KeyCode::Char('r') => Some(UiEvent::NewBody(BodyKind::Request)),
        KeyCode::Char('s') => Some(UiEvent::NewBody(BodyKind::Response)),
        KeyCode::Char('R') | KeyCode::F(5) => Some(UiEvent::Reload),
        KeyCode::Char('L') => Some(UiEvent::Logout),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_depends_on_focused_field() {
        let enter = press(KeyCode::Enter);
        assert_eq!(
            key_to_ui_event(enter, InputMode::Form { multiline: true }),
            Some(UiEvent::Newline)
        );
        assert_eq!(
            key_to_ui_event(enter, InputMode::Form { multiline: false }),
            Some(UiEvent::Submit)
        );
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(save, InputMode::Form { multiline: true }),
            Some(UiEvent::Submit)
        );
    }

    #[test]
    fn test_letters_are_text_in_forms_and_actions_in_lists() {
        let d = press(KeyCode::Char('d'));
        assert_eq!(key_to_ui_event(d, InputMode::Normal), Some(UiEvent::Delete));
        assert_eq!(
            key_to_ui_event(d, InputMode::Form { multiline: false }),
            Some(UiEvent::CharInput('d'))
        );
        assert_eq!(key_to_ui_event(d, InputMode::Alert), None);
    }
}
