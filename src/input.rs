use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use snake::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Pause,
    Quit,
}

/// Maps a key press to what the player asked for. Keys with no meaning map
/// to `None`.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Direction::Right)),
        KeyCode::Char(' ') => Some(Command::Restart),
        KeyCode::Esc => Some(Command::Pause),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(command_for(&key(KeyCode::Up)), Some(Command::Turn(Direction::Up)));
        assert_eq!(command_for(&key(KeyCode::Down)), Some(Command::Turn(Direction::Down)));
        assert_eq!(command_for(&key(KeyCode::Left)), Some(Command::Turn(Direction::Left)));
        assert_eq!(command_for(&key(KeyCode::Right)), Some(Command::Turn(Direction::Right)));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('w'))), Some(Command::Turn(Direction::Up)));
        assert_eq!(command_for(&key(KeyCode::Char('d'))), Some(Command::Turn(Direction::Right)));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(command_for(&key(KeyCode::Char(' '))), Some(Command::Restart));
        assert_eq!(command_for(&key(KeyCode::Esc)), Some(Command::Pause));
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&key(KeyCode::Enter)), None);
    }
}
