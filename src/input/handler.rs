use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Heading;
use crate::session::{SessionAction, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Session(SessionAction),
    Quit,
    None,
}

/// Maps key presses to session actions for the screen being shown
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, state: SessionState) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match state {
            SessionState::Menu => Self::menu_key(key.code),
            SessionState::DifficultySelect => {
                Self::selection_key(key.code, SessionAction::SelectDifficulty)
            }
            SessionState::ColorSelect => Self::selection_key(key.code, SessionAction::SelectColor),
            SessionState::Countdown | SessionState::Playing => Self::play_key(key.code),
            SessionState::GameOver => Self::game_over_key(key.code),
        }
    }

    fn menu_key(code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::Session(SessionAction::Play)
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Session(SessionAction::OpenDifficulty)
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                KeyAction::Session(SessionAction::OpenColors)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    fn selection_key(code: KeyCode, select: fn(usize) -> SessionAction) -> KeyAction {
        match code {
            // Entries are numbered from 1 on screen
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                KeyAction::Session(select(index))
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') | KeyCode::Char('B') => {
                KeyAction::Session(SessionAction::Back)
            }
            _ => KeyAction::None,
        }
    }

    fn play_key(code: KeyCode) -> KeyAction {
        let heading = match code {
            // Movement - Arrow keys
            KeyCode::Up => Heading::Up,
            KeyCode::Down => Heading::Down,
            KeyCode::Left => Heading::Left,
            KeyCode::Right => Heading::Right,

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Heading::Up,
            KeyCode::Char('s') | KeyCode::Char('S') => Heading::Down,
            KeyCode::Char('a') | KeyCode::Char('A') => Heading::Left,
            KeyCode::Char('d') | KeyCode::Char('D') => Heading::Right,

            KeyCode::Esc => return KeyAction::Session(SessionAction::Escape),
            _ => return KeyAction::None,
        };

        KeyAction::Session(SessionAction::Steer(heading))
    }

    fn game_over_key(code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                KeyAction::Session(SessionAction::Restart)
            }
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => {
                KeyAction::Session(SessionAction::Menu)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
