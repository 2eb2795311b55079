//! Input handling - convert key events to session commands
//!
//! Field movement follows the reference bindings: arrow keys or WASD to
//! move, Space/Enter to interact and to advance the message window.
//! Battle actions use their initial letters, so the same key can mean
//! "move down" on the field and "skill" in battle.

use crossterm::event::{KeyCode, KeyEvent};
use hk_core::player::Direction;
use hk_core::session::Command;

/// Convert a key event to a session command.
///
/// App-level keys (quit, help, settings, history) are handled in app.rs;
/// this covers only the commands the session itself understands.
pub fn key_to_command(key: KeyEvent, in_battle: bool) -> Option<Command> {
    if in_battle {
        return match key.code {
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::Attack),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Skill),
            KeyCode::Char('i') | KeyCode::Char('I') => Some(Command::Item),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::Flee),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Confirm),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Command::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Move(Direction::Right))
        }
        KeyCode::Char(' ') => Some(Command::Interact),
        KeyCode::Enter => Some(Command::Confirm),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn field_bindings() {
        assert_eq!(
            key_to_command(key(KeyCode::Up), false),
            Some(Command::Move(Direction::Up))
        );
        assert_eq!(
            key_to_command(key(KeyCode::Char('s')), false),
            Some(Command::Move(Direction::Down))
        );
        assert_eq!(
            key_to_command(key(KeyCode::Char(' ')), false),
            Some(Command::Interact)
        );
    }

    #[test]
    fn battle_bindings_reuse_field_letters() {
        assert_eq!(
            key_to_command(key(KeyCode::Char('a')), true),
            Some(Command::Attack)
        );
        assert_eq!(
            key_to_command(key(KeyCode::Char('s')), true),
            Some(Command::Skill)
        );
        assert_eq!(
            key_to_command(key(KeyCode::Char('f')), true),
            Some(Command::Flee)
        );
        assert_eq!(key_to_command(key(KeyCode::Up), true), None);
    }
}
