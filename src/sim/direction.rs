//! Cardinal directions and small direction sets
//!
//! Screen coordinates: +x is right, +y is down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four travel directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order adversaries probe them
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector pointing this way
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    /// Velocity of the given magnitude along this direction
    #[inline]
    pub fn velocity(self, speed: f32) -> Vec2 {
        self.unit() * speed
    }

    /// Direction of travel implied by a velocity.
    ///
    /// Horizontal motion wins over vertical; zero velocity has no direction.
    pub fn of_velocity(vel: Vec2) -> Option<Direction> {
        if vel.x > 0.0 {
            Some(Direction::Right)
        } else if vel.x < 0.0 {
            Some(Direction::Left)
        } else if vel.y < 0.0 {
            Some(Direction::Up)
        } else if vel.y > 0.0 {
            Some(Direction::Down)
        } else {
            None
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }
}

/// Order-independent set of directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Directions in `self` that are not in `other`
    pub fn difference(self, other: DirectionSet) -> DirectionSet {
        DirectionSet(self.0 & !other.0)
    }

    /// Members in stable probe order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}
