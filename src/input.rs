use bitflags::bitflags;
use crossterm::event::KeyCode;

/// The four directional commands the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Soft drop.
    Down,
    /// Rotate.
    Up,
}

impl Key {
    /// Arrow keys only; everything else is ignored.
    pub fn from_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Up => Some(Key::Up),
            _ => None,
        }
    }
}

bitflags! {
    /// Keys seen since the last frame, for the on-screen indicator.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
    pub struct Input: u8 {
        const Up    = 1<<0;
        const Down  = 1<<1;
        const Left  = 1<<2;
        const Right = 1<<3;
    }
}

impl From<Key> for Input {
    fn from(key: Key) -> Self {
        match key {
            Key::Left => Input::Left,
            Key::Right => Input::Right,
            Key::Down => Input::Down,
            Key::Up => Input::Up,
        }
    }
}
