use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Velocity;

/// Arrow keys and WASD. Anything else maps to `None`.
pub fn velocity_for(code: &KeyCode) -> Option<Velocity> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Velocity::UP),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Velocity::LEFT),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Velocity::DOWN),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Velocity::RIGHT),
        _ => None,
    }
}

/// What the front end should do with a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Velocity),
    Start,
    Quit,
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }
    match ev.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
        ref code => velocity_for(code).map(Command::Steer),
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn arrows_and_wasd_agree() {
        assert_eq!(velocity_for(&KeyCode::Up), velocity_for(&KeyCode::Char('w')));
        assert_eq!(velocity_for(&KeyCode::Left), velocity_for(&KeyCode::Char('a')));
        assert_eq!(velocity_for(&KeyCode::Down), velocity_for(&KeyCode::Char('s')));
        assert_eq!(velocity_for(&KeyCode::Right), velocity_for(&KeyCode::Char('d')));
        assert_eq!(velocity_for(&KeyCode::Down), Some(Velocity::DOWN));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(velocity_for(&KeyCode::Char('x')), None);
        assert_eq!(velocity_for(&KeyCode::Tab), None);
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn control_keys() {
        assert_eq!(command_for(&key(KeyCode::Enter)), Some(Command::Start));
        assert_eq!(command_for(&key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }), Some(Command::Quit));
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
        assert_eq!(command_for(&key(KeyCode::Char('a'))), Some(Command::Steer(Velocity::LEFT)));
    }
}
