//! Key mapping from terminal events to logical buttons.

use crate::types::Buttons;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the button it drives, or `Buttons::NONE`.
pub fn map_key(code: KeyCode) -> Buttons {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Buttons::LEFT
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Buttons::RIGHT
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Buttons::DOWN
        }
        KeyCode::Char('v') | KeyCode::Char('V') => Buttons::ALT_DOWN,

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Buttons::ROTATE_CW,
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Buttons::ROTATE_CCW,

        // Actions
        KeyCode::Char(' ') => Buttons::HARD_DROP,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => Buttons::PAUSE,

        // Debug
        KeyCode::F(1) => Buttons::DEBUG_CLEAR,
        KeyCode::F(2) => Buttons::DEBUG_LEVEL,

        _ => Buttons::NONE,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
