//! Keyboard input
//!
//! Arrow keys set the paddle's velocity directly. There is no key state tracking:
//! the last key pressed wins, and releasing either arrow stops the paddle.

use crate::sim::Paddle;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Map a `KeyboardEvent.key` value, accepting both legacy and modern names
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Left" | "ArrowLeft" => Some(Key::Left),
            "Right" | "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Key pressed: move at full speed in that direction
pub fn key_down(paddle: &mut Paddle, key: Key) {
    paddle.dx = match key {
        Key::Left => -paddle.speed,
        Key::Right => paddle.speed,
    };
}

/// Key released: stop, whichever arrow was actually held
pub fn key_up(paddle: &mut Paddle, _key: Key) {
    paddle.dx = 0.0;
}
