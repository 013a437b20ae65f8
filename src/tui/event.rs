//! Event types for the TUI
//!
//! Two channels feed the event loop:
//! - InputEvent: priority channel for user input (never dropped)
//! - DataEvent: request completions and animation ticks

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::controller::FetchCompletion;

/// Input events from the terminal (priority channel - never dropped)
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    #[allow(dead_code)]
    Resize(u16, u16),
}

/// Data and control events
#[derive(Debug)]
pub enum DataEvent {
    /// Spinner tick (only sent while a request is loading)
    AnimationTick,

    /// A candidates request finished
    CandidatesFetched(FetchCompletion),
}

impl From<FetchCompletion> for DataEvent {
    fn from(completion: FetchCompletion) -> Self {
        DataEvent::CandidatesFetched(completion)
    }
}

/// Result of processing an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running, UI needs redraw
    Continue,
    /// Continue running, no UI change needed
    Unchanged,
    /// Quit the application
    Quit,
}

/// Key action mappings for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    SwitchFocus,

    // Pagination
    PrevPage,
    NextPage,

    // Actions
    Select,
    Toggle,
    FocusSearch,
    ToggleFullText,
    ResetFilters,
    Refresh,

    // UI
    ShowHelp,
    Escape,
    Quit,

    // Search editing
    SearchClear,
    SearchBackspace,
    SearchChar(char),

    MouseScrollUp,
    MouseScrollDown,

    Unknown,
}

impl KeyAction {
    /// Map a mouse event to an action
    pub fn from_mouse_event(event: MouseEvent) -> Self {
        use crossterm::event::MouseEventKind;

        match event.kind {
            MouseEventKind::ScrollUp => KeyAction::MouseScrollUp,
            MouseEventKind::ScrollDown => KeyAction::MouseScrollDown,
            _ => KeyAction::Unknown,
        }
    }

    /// Map a key event to an action based on current mode
    pub fn from_key_event(event: KeyEvent, editing_search: bool) -> Self {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if editing_search {
            return match code {
                KeyCode::Esc => KeyAction::Escape,
                KeyCode::Enter | KeyCode::Tab => KeyAction::Select,
                KeyCode::Backspace => KeyAction::SearchBackspace,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
                KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                    KeyAction::SearchClear
                }
                KeyCode::Char(c) => KeyAction::SearchChar(c),
                _ => KeyAction::Unknown,
            };
        }

        match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

            KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveUp,
            KeyCode::Char('g') | KeyCode::Home => KeyAction::MoveToTop,
            KeyCode::Char('G') | KeyCode::End => KeyAction::MoveToBottom,
            KeyCode::Tab | KeyCode::BackTab => KeyAction::SwitchFocus,

            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => KeyAction::PrevPage,
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => KeyAction::NextPage,

            KeyCode::Enter => KeyAction::Select,
            KeyCode::Char(' ') => KeyAction::Toggle,
            KeyCode::Char('/') => KeyAction::FocusSearch,
            KeyCode::Char('t') => KeyAction::ToggleFullText,
            KeyCode::Char('x') => KeyAction::ResetFilters,
            KeyCode::Char('r') => KeyAction::Refresh,

            KeyCode::Char('?') | KeyCode::F(1) => KeyAction::ShowHelp,
            KeyCode::Esc => KeyAction::Escape,

            _ => KeyAction::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action_quit() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(event, false), KeyAction::Quit);
    }

    #[test]
    fn test_search_mode_captures_letters() {
        // 'q' is text while editing the search box
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(
            KeyAction::from_key_event(event, true),
            KeyAction::SearchChar('q')
        );

        let event = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(event, true), KeyAction::SearchClear);
    }

    #[test]
    fn test_pagination_keys() {
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        let right = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(KeyAction::from_key_event(left, false), KeyAction::PrevPage);
        assert_eq!(KeyAction::from_key_event(right, false), KeyAction::NextPage);
    }

    #[test]
    fn test_completion_converts_to_data_event() {
        let completion = FetchCompletion {
            generation: 3,
            outcome: Err(crate::api::ApiError::Cancelled),
        };
        let event: DataEvent = completion.into();
        assert!(matches!(
            event,
            DataEvent::CandidatesFetched(FetchCompletion { generation: 3, .. })
        ));
    }
}
