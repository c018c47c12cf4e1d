//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Backspace,
    Clear,
    Submit,
    Quit,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::Clear),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Esc => Some(Action::Clear),
        KeyCode::Char(c) => Some(Action::Insert(c)),
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
    fn typing_and_editing() {
        assert_eq!(action_for(press(KeyCode::Char('L'))), Some(Action::Insert('L')));
        assert_eq!(action_for(press(KeyCode::Char(' '))), Some(Action::Insert(' ')));
        assert_eq!(action_for(press(KeyCode::Backspace)), Some(Action::Backspace));
        assert_eq!(action_for(press(KeyCode::Esc)), Some(Action::Clear));
    }

    #[test]
    fn enter_submits() {
        assert_eq!(action_for(press(KeyCode::Enter)), Some(Action::Submit));
    }

    #[test]
    fn q_is_text_unless_control_is_held() {
        assert_eq!(action_for(press(KeyCode::Char('q'))), Some(Action::Insert('q')));
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_q), Some(Action::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_c), Some(Action::Quit));
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for(key), None);
    }
}
