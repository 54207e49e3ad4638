use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

impl Command {
    /// Letters match regardless of case. Ctrl+C maps to `Quit` since raw
    /// mode delivers it as a key instead of a signal.
    pub fn from_key_event(ev: KeyEvent) -> Option<Command> {
        if is_ctrl_c(&ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Up => Some(Command::Turn(Direction::Up)),
            KeyCode::Down => Some(Command::Turn(Direction::Down)),
            KeyCode::Left => Some(Command::Turn(Direction::Left)),
            KeyCode::Right => Some(Command::Turn(Direction::Right)),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Command::Turn(Direction::Up)),
                's' => Some(Command::Turn(Direction::Down)),
                'a' => Some(Command::Turn(Direction::Left)),
                'd' => Some(Command::Turn(Direction::Right)),
                'q' => Some(Command::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
