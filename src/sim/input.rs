//! Per-tick input snapshot
//!
//! The kernel never reads key state on its own. The host builds one of these
//! each frame and passes it into `WorldState::update`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
}

impl Key {
    pub const ALL: [Key; 3] = [Key::ArrowLeft, Key::ArrowRight, Key::ArrowUp];

    /// DOM-style key name
    pub fn name(&self) -> &'static str {
        match self {
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::ArrowUp => "ArrowUp",
        }
    }
}

/// A key name that is not one of `Key::ALL`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name {0:?}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// Which keys are held down during a tick. Anything not set is released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl InputSnapshot {
    /// Snapshot with exactly `keys` held
    pub fn pressed(keys: &[Key]) -> Self {
        let mut input = Self::default();
        for &key in keys {
            input.set(key, true);
        }
        input
    }

    /// Build from a `name -> pressed` mapping. Names outside the key set are ignored.
    pub fn from_names<'a>(entries: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let mut input = Self::default();
        for (name, down) in entries {
            if let Ok(key) = name.parse::<Key>() {
                input.set(key, down);
            }
        }
        input
    }

    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::ArrowLeft => self.left = down,
            Key::ArrowRight => self.right = down,
            Key::ArrowUp => self.up = down,
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::ArrowLeft => self.left,
            Key::ArrowRight => self.right,
            Key::ArrowUp => self.up,
        }
    }

    /// -1, 0 or +1 along x. Opposite keys cancel.
    pub fn horizontal(&self) -> f32 {
        let mut dir = 0.0;
        if self.left {
            dir -= 1.0;
        }
        if self.right {
            dir += 1.0;
        }
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        for key in Key::ALL {
            assert_eq!(key.name().parse::<Key>(), Ok(key));
        }
        assert_eq!(
            "Space".parse::<Key>(),
            Err(UnknownKey("Space".to_string()))
        );
    }

    #[test]
    fn test_absent_keys_are_released() {
        let input = InputSnapshot::from_names([("ArrowUp", true), ("KeyZ", true)]);
        assert!(input.up);
        assert!(!input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_horizontal() {
        assert_eq!(InputSnapshot::default().horizontal(), 0.0);
        assert_eq!(InputSnapshot::pressed(&[Key::ArrowLeft]).horizontal(), -1.0);
        assert_eq!(InputSnapshot::pressed(&[Key::ArrowRight]).horizontal(), 1.0);
        assert_eq!(
            InputSnapshot::pressed(&[Key::ArrowLeft, Key::ArrowRight]).horizontal(),
            0.0
        );
    }

    #[test]
    fn test_later_entries_win() {
        let input = InputSnapshot::from_names([("ArrowLeft", true), ("ArrowLeft", false)]);
        assert!(!input.is_pressed(Key::ArrowLeft));
    }
}
