//! Predictive circle-vs-wall collision
//!
//! Every moving entity is a circle and every wall is an axis-aligned tile.
//! Tests are *predictive*: they check where the circle would be after
//! applying a candidate velocity, so a move can be refused before it is
//! committed rather than undone after the fact.
//!
//! Walls are inflated by a padding of `TILE_SIZE / 2 - radius - 1` on every
//! side. That keeps the collidable boundary one unit short of the tile
//! gridline for a circle of the given radius, so entities glide along
//! corridor centers instead of snagging on tile edges.

use glam::Vec2;

use super::maze::Wall;
use crate::consts::TILE_SIZE;

/// Axis-aligned rectangle (position is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            width,
            height,
        }
    }
}

/// A circle with a candidate velocity to test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
}

impl Circle {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2) -> Self {
        Self {
            position,
            radius,
            velocity,
        }
    }

    /// Same circle, different candidate velocity
    #[inline]
    pub fn with_velocity(self, velocity: Vec2) -> Self {
        Self { velocity, ..self }
    }
}

/// Inflation applied to walls for a circle of the given radius
#[inline]
pub fn padding(radius: f32) -> f32 {
    TILE_SIZE / 2.0 - radius - 1.0
}

/// Would `circle`, moved by its velocity, overlap the padded `rect`?
///
/// All four half-plane checks must hold. Bounds are inclusive.
pub fn overlaps(circle: &Circle, rect: &Rect) -> bool {
    let pad = padding(circle.radius);
    let next = circle.position + circle.velocity;
    let r = circle.radius;

    next.y - r <= rect.position.y + rect.height + pad
        && next.x + r >= rect.position.x - pad
        && next.y + r >= rect.position.y - pad
        && next.x - r <= rect.position.x + rect.width + pad
}

/// Would `circle` run into any of `walls`?
pub fn blocked_by_any(circle: &Circle, walls: &[Wall]) -> bool {
    walls.iter().any(|wall| overlaps(circle, &wall.rect))
}

/// Centers within `reach` of each other (inclusive). Used for adversary contact.
#[inline]
pub fn touching(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance(b) <= reach
}

/// Centers strictly closer than `reach`. Used for pickups.
#[inline]
pub fn overlapping(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance(b) < reach
}
