//! Keybinding definitions for the TUI.
//!
//! The same key means different things depending on what has focus: in the
//! prompt input letters are text, in the file tree `j`/`k` move.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which widget receives plain keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Tree,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Input => Focus::Tree,
            Focus::Tree => Focus::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit,
    ToggleView,
    SwitchFocus,
    MoveUp,
    MoveDown,
    Activate,
    Push,
    Confirm,
    Cancel,
    /// Forward the key to the prompt editor.
    Edit(KeyEvent),
}

pub fn map_key(event: KeyEvent, focus: Focus, modal_open: bool) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('o') if !modal_open => Some(Action::ToggleView),
            KeyCode::Char('p') if !modal_open => Some(Action::Push),
            _ if focus == Focus::Input && !modal_open => Some(Action::Edit(event)),
            _ => None,
        };
    }

    if modal_open {
        return match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        };
    }

    if code == KeyCode::Tab {
        return Some(Action::SwitchFocus);
    }

    match focus {
        Focus::Input => match code {
            KeyCode::Enter => Some(Action::Submit),
            _ => Some(Action::Edit(event)),
        },
        Focus::Tree => match code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
            KeyCode::Esc => Some(Action::SwitchFocus),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(map_key(key(KeyCode::Char('o'), ctrl), Focus::Input, false), Some(Action::ToggleView));
        assert_eq!(map_key(key(KeyCode::Char('p'), ctrl), Focus::Tree, false), Some(Action::Push));
        assert_eq!(map_key(key(KeyCode::Char('q'), ctrl), Focus::Tree, true), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Char('o'), ctrl), Focus::Input, true), None);
    }

    #[test]
    fn test_letters_are_text_in_input() {
        let event = key(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(map_key(event, Focus::Input, false), Some(Action::Edit(event)));
        assert_eq!(map_key(event, Focus::Tree, false), Some(Action::MoveDown));
    }

    #[test]
    fn test_enter_depends_on_focus() {
        let enter = key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(map_key(enter, Focus::Input, false), Some(Action::Submit));
        assert_eq!(map_key(enter, Focus::Tree, false), Some(Action::Activate));
        assert_eq!(map_key(enter, Focus::Tree, true), Some(Action::Confirm));
    }

    #[test]
    fn test_modal_swallows_other_keys() {
        assert_eq!(map_key(key(KeyCode::Char('x'), KeyModifiers::NONE), Focus::Input, true), None);
        assert_eq!(map_key(key(KeyCode::Char('n'), KeyModifiers::NONE), Focus::Input, true), Some(Action::Cancel));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut event = key(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(event, Focus::Input, false), None);
    }
}
