//! Per-frame keyboard snapshot consumed by the simulation.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Space bar.
    Jump,
    /// S key.
    Shoot,
    Enter,
    /// Digit 2 on the home screen.
    LevelTwo,
}

/// Which keys are held down and which went down this frame.
#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as held for this frame.
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Marks `key` as pressed this frame. A press is also a hold.
    pub fn press(mut self, key: Key) -> Self {
        self.pressed.insert(key);
        self.held.insert(key);
        self
    }

    pub fn set_held(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn set_pressed(&mut self, key: Key) {
        self.pressed.insert(key);
        self.held.insert(key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}
