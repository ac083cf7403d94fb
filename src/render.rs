//! Rendering boundary. The simulation only decides what is visible and
//! where; a [`Canvas`] turns that into pixels or terminal cells.

use crate::entities::{Direction, Rect};

/// What the player is carrying, which selects the player sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Held {
    Nothing,
    Hammer,
    Blaster,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Platform,
    Ladder,
    Hammer,
    Blaster,
    Player { held: Held, facing: Direction },
    Donkey,
    Barrel,
    NormalMonkey { facing: Direction },
    IntelligentMonkey { facing: Direction },
    Banana,
    Bullet { facing: Direction },
}

pub trait Canvas {
    /// Draws `sprite` filling `bounds` (world coordinates).
    fn draw(&mut self, sprite: Sprite, bounds: Rect);
}

/// Canvas that records draw calls; handy for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<(Sprite, Rect)>,
}

impl RecordingCanvas {
    pub fn count(&self, predicate: impl Fn(&Sprite) -> bool) -> usize {
        self.calls.iter().filter(|(sprite, _)| predicate(sprite)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, sprite: Sprite, bounds: Rect) {
        self.calls.push((sprite, bounds));
    }
}
