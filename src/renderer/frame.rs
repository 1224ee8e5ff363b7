//! Per-frame draw pass

use glam::Vec2;

use super::surface::{DrawSurface, Sprite};
use crate::sim::GameState;

/// Glyph used for collectibles
pub const COLLECTIBLE_GLYPH: char = '🥊';
/// Font size of the collectible glyph
pub const COLLECTIBLE_FONT_SIZE: f32 = 14.0;
/// Offset from a collectible's center to its glyph origin
const COLLECTIBLE_GLYPH_OFFSET: Vec2 = Vec2::new(-12.0, 5.0);

/// Draw the whole state: power-ups, collectibles, walls, avatar, adversaries
pub fn render_frame<S: DrawSurface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear();

    for power_up in &state.power_ups {
        let r = Vec2::splat(power_up.radius);
        surface.draw_sprite(Sprite::PowerUp, power_up.pos - r, r * 2.0, 0.0);
    }

    for collectible in &state.collectibles {
        surface.draw_glyph(
            COLLECTIBLE_GLYPH,
            collectible.pos + COLLECTIBLE_GLYPH_OFFSET,
            COLLECTIBLE_FONT_SIZE,
        );
    }

    for wall in state.walls() {
        let rect = &wall.rect;
        surface.draw_sprite(
            Sprite::Wall(wall.kind),
            rect.position,
            Vec2::new(rect.width, rect.height),
            0.0,
        );
    }

    let avatar = &state.avatar;
    let r = Vec2::splat(avatar.radius);
    surface.draw_sprite(Sprite::Avatar, avatar.pos - r, r * 2.0, avatar.facing.rotation());

    for adversary in &state.adversaries {
        let sprite = if adversary.threatened {
            Sprite::ScaredAdversary
        } else {
            Sprite::Adversary(adversary.sprite)
        };
        let r = Vec2::splat(adversary.radius);
        surface.draw_sprite(sprite, adversary.pos - r, r * 2.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawCommand, RecordingSurface};
    use crate::sim::Facing;

    #[test]
    fn test_every_entity_drawn_once() {
        let state = GameState::new(3);
        let mut surface = RecordingSurface::new();
        render_frame(&state, &mut surface);

        assert_eq!(surface.glyph_count(), state.collectibles.len());
        assert_eq!(
            surface.sprites(|s| matches!(s, Sprite::Wall(_))).count(),
            state.walls().len()
        );
        assert_eq!(surface.sprites(|s| s == Sprite::PowerUp).count(), 1);
        assert_eq!(surface.sprites(|s| matches!(s, Sprite::Adversary(_))).count(), 4);
        assert_eq!(surface.sprites(|s| s == Sprite::Avatar).count(), 1);
    }

    #[test]
    fn test_clears_between_frames() {
        let state = GameState::new(3);
        let mut surface = RecordingSurface::new();
        render_frame(&state, &mut surface);
        let first = surface.commands.len();
        render_frame(&state, &mut surface);
        assert_eq!(surface.commands.len(), first);
    }

    #[test]
    fn test_avatar_box_and_rotation() {
        let mut state = GameState::new(3);
        state.avatar.facing = Facing::Right;
        let mut surface = RecordingSurface::new();
        render_frame(&state, &mut surface);

        let avatar = surface.sprites(|s| s == Sprite::Avatar).next().copied();
        assert_eq!(
            avatar,
            Some(DrawCommand::Sprite {
                sprite: Sprite::Avatar,
                top_left: Vec2::new(45.0, 45.0),
                size: Vec2::splat(30.0),
                rotation: Facing::Right.rotation(),
            })
        );
    }

    #[test]
    fn test_threatened_adversaries_look_scared() {
        let mut state = GameState::new(3);
        state.adversaries[1].threaten(100);
        let mut surface = RecordingSurface::new();
        render_frame(&state, &mut surface);
        assert_eq!(surface.sprites(|s| s == Sprite::ScaredAdversary).count(), 1);
        assert_eq!(surface.sprites(|s| s == Sprite::Adversary(1)).count(), 0);
    }
}
