//! Draw surface capability

use glam::Vec2;

use crate::sim::WallKind;

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Wall(WallKind),
    Avatar,
    /// Adversary by identity (each has its own look)
    Adversary(usize),
    /// Shared look of any threatened adversary
    ScaredAdversary,
    PowerUp,
}

/// Something the core can draw on
pub trait DrawSurface {
    /// Start a new frame
    fn clear(&mut self);

    /// Draw `sprite` scaled into the box at `top_left` of `size`, rotated by
    /// `rotation` radians about the box center
    fn draw_sprite(&mut self, sprite: Sprite, top_left: Vec2, size: Vec2, rotation: f32);

    /// Draw a text glyph with its baseline origin at `position`
    fn draw_glyph(&mut self, glyph: char, position: Vec2, font_size: f32);
}

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sprite: Sprite,
        top_left: Vec2,
        size: Vec2,
        rotation: f32,
    },
    Glyph {
        glyph: char,
        position: Vec2,
        font_size: f32,
    },
}

/// Surface that keeps the calls of the latest frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded sprites matching `pred`
    pub fn sprites(&self, pred: impl Fn(Sprite) -> bool) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |c| matches!(c, DrawCommand::Sprite { sprite, .. } if pred(*sprite)))
    }

    pub fn glyph_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glyph { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw_sprite(&mut self, sprite: Sprite, top_left: Vec2, size: Vec2, rotation: f32) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            top_left,
            size,
            rotation,
        });
    }

    fn draw_glyph(&mut self, glyph: char, position: Vec2, font_size: f32) {
        self.commands.push(DrawCommand::Glyph {
            glyph,
            position,
            font_size,
        });
    }
}
