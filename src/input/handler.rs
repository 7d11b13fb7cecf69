use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    ToggleColorblind,
    ToggleTheme,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Game(Direction::Up.into()),
            KeyCode::Down => KeyAction::Game(Direction::Down.into()),
            KeyCode::Left => KeyAction::Game(Direction::Left.into()),
            KeyCode::Right => KeyAction::Game(Direction::Right.into()),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Game(Direction::Up.into()),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Game(Direction::Down.into()),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Game(Direction::Left.into()),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Game(Direction::Right.into()),

            // Game controls
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::Game(Command::TogglePause)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(Command::Restart),

            // Presentation
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::ToggleColorblind,
            KeyCode::Char('t') | KeyCode::Char('T') => KeyAction::ToggleTheme,

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

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

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            press(KeyCode::Up),
            KeyAction::Game(Command::ChangeDirection(Direction::Up))
        );
        assert_eq!(
            press(KeyCode::Down),
            KeyAction::Game(Command::ChangeDirection(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Left),
            KeyAction::Game(Command::ChangeDirection(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Right),
            KeyAction::Game(Command::ChangeDirection(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(
            press(KeyCode::Char('w')),
            KeyAction::Game(Command::ChangeDirection(Direction::Up))
        );
        assert_eq!(
            press(KeyCode::Char('a')),
            KeyAction::Game(Command::ChangeDirection(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Char('s')),
            KeyAction::Game(Command::ChangeDirection(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Char('D')),
            KeyAction::Game(Command::ChangeDirection(Direction::Right))
        );
    }

    #[test]
    fn test_pause_and_restart_keys() {
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::Game(Command::TogglePause));
        assert_eq!(press(KeyCode::Char('p')), KeyAction::Game(Command::TogglePause));
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Game(Command::Restart));
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Game(Command::Restart));
    }

    #[test]
    fn test_presentation_keys() {
        assert_eq!(press(KeyCode::Char('c')), KeyAction::ToggleColorblind);
        assert_eq!(press(KeyCode::Char('t')), KeyAction::ToggleTheme);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }
}
