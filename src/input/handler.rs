use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Difficulty, Direction};

/// What a key press asks the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Change heading on the next tick
    Turn(Direction),
    /// Pick a difficulty in the start menu
    SelectDifficulty(Difficulty),
    Restart,
    Quit,
    None,
}

/// Maps letter keys and arrow keys to the same intents
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) => Self::handle_char(c),
            _ => KeyAction::None,
        }
    }

    fn handle_char(c: char) -> KeyAction {
        if let Some(difficulty) = Difficulty::from_menu_key(c) {
            return KeyAction::SelectDifficulty(difficulty);
        }

        match c.to_ascii_lowercase() {
            'w' => KeyAction::Turn(Direction::Up),
            's' => KeyAction::Turn(Direction::Down),
            'a' => KeyAction::Turn(Direction::Left),
            'd' => KeyAction::Turn(Direction::Right),
            'q' => KeyAction::Quit,
            'r' => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_and_letters_agree() {
        let handler = InputHandler::new();
        let pairs = [
            (KeyCode::Up, 'w', Direction::Up),
            (KeyCode::Down, 's', Direction::Down),
            (KeyCode::Left, 'a', Direction::Left),
            (KeyCode::Right, 'd', Direction::Right),
        ];

        for (arrow, letter, direction) in pairs {
            let expected = KeyAction::Turn(direction);
            assert_eq!(handler.handle_key_event(press(arrow)), expected);
            assert_eq!(handler.handle_key_event(press(KeyCode::Char(letter))), expected);
            assert_eq!(
                handler.handle_key_event(KeyEvent::new(
                    KeyCode::Char(letter.to_ascii_uppercase()),
                    KeyModifiers::SHIFT
                )),
                expected
            );
        }
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('Q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('r'))), KeyAction::Restart);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('R'))), KeyAction::Restart);
    }

    #[test]
    fn test_difficulty_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('1'))),
            KeyAction::SelectDifficulty(Difficulty::Easy)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('3'))),
            KeyAction::SelectDifficulty(Difficulty::Hard)
        );
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::Tab)), KeyAction::None);
    }
}
