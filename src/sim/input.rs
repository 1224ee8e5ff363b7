//! Direction-key input tracking
//!
//! The input source delivers discrete press/release events. Movement intent
//! is last-key-wins: only the most recently pressed key drives the avatar,
//! and only while it is still held. Releasing it drops the intent even if
//! another direction key is still down.

use super::direction::{Direction, DirectionSet};
use super::tick::TickInput;

/// Map a keyboard key name to a direction
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "w" | "ArrowUp" => Some(Direction::Up),
        "a" | "ArrowLeft" => Some(Direction::Left),
        "s" | "ArrowDown" => Some(Direction::Down),
        "d" | "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Held keys plus the most recent press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputTracker {
    held: DirectionSet,
    last_pressed: Option<Direction>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, dir: Direction) {
        self.held.insert(dir);
        self.last_pressed = Some(dir);
    }

    pub fn release(&mut self, dir: Direction) {
        self.held.remove(dir);
    }

    /// Key-name wrapper around [`InputTracker::press`]; unknown keys are ignored
    pub fn key_down(&mut self, key: &str) {
        if let Some(dir) = key_direction(key) {
            self.press(dir);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(dir) = key_direction(key) {
            self.release(dir);
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held.contains(dir)
    }

    /// The direction that drives the avatar this tick, if any
    pub fn intent(&self) -> Option<Direction> {
        self.last_pressed.filter(|dir| self.held.contains(*dir))
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            intent: self.intent(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
