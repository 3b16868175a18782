//! Keyboard steering
//!
//! Key handlers write an `InputState`; the tick reads it and copies the
//! velocity into the player car. Nothing else writes the record.

use glam::Vec2;

/// The four steering keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    /// Map a DOM `KeyboardEvent.key` value; anything else is ignored
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(ArrowKey::Up),
            "ArrowDown" => Some(ArrowKey::Down),
            "ArrowLeft" => Some(ArrowKey::Left),
            "ArrowRight" => Some(ArrowKey::Right),
            _ => None,
        }
    }
}

/// Requested player velocity, last event wins per axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub velocity: Vec2,
}

impl InputState {
    pub fn press(&mut self, key: ArrowKey, speed: f32) {
        match key {
            ArrowKey::Up => self.velocity.y = -speed,
            ArrowKey::Down => self.velocity.y = speed,
            ArrowKey::Left => self.velocity.x = -speed,
            ArrowKey::Right => self.velocity.x = speed,
        }
    }

    /// Releasing a key stops its whole axis, even if the opposite key is held
    pub fn release(&mut self, key: ArrowKey) {
        match key {
            ArrowKey::Up | ArrowKey::Down => self.velocity.y = 0.0,
            ArrowKey::Left | ArrowKey::Right => self.velocity.x = 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(ArrowKey::from_key_name("ArrowUp"), Some(ArrowKey::Up));
        assert_eq!(ArrowKey::from_key_name("ArrowDown"), Some(ArrowKey::Down));
        assert_eq!(ArrowKey::from_key_name("ArrowLeft"), Some(ArrowKey::Left));
        assert_eq!(ArrowKey::from_key_name("ArrowRight"), Some(ArrowKey::Right));
        assert_eq!(ArrowKey::from_key_name("w"), None);
        assert_eq!(ArrowKey::from_key_name("arrowup"), None);
    }

    #[test]
    fn test_press_sets_axis() {
        let mut input = InputState::default();
        input.press(ArrowKey::Up, 5.0);
        input.press(ArrowKey::Right, 5.0);
        assert_eq!(input.velocity, Vec2::new(5.0, -5.0));

        input.press(ArrowKey::Down, 5.0);
        assert_eq!(input.velocity, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_release_zeroes_axis_regardless_of_key() {
        let mut input = InputState::default();
        input.press(ArrowKey::Up, 5.0);
        input.press(ArrowKey::Down, 5.0);
        // Releasing the earlier key still stops vertical motion
        input.release(ArrowKey::Up);
        assert_eq!(input.velocity, Vec2::ZERO);

        input.press(ArrowKey::Left, 5.0);
        input.release(ArrowKey::Right);
        assert_eq!(input.velocity.x, 0.0);
    }

    #[test]
    fn test_reset() {
        let mut input = InputState::default();
        input.press(ArrowKey::Left, 5.0);
        input.reset();
        assert_eq!(input, InputState::default());
    }
}
