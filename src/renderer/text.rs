//! Character-grid surface for terminals and logs
//!
//! One character per maze cell. Later draws overwrite earlier ones, so the
//! frame order decides what shows when entities share a cell.

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use glam::Vec2;

use super::surface::{DrawSurface, Sprite};
use crate::consts::TILE_SIZE;

#[derive(Debug, Clone)]
pub struct TextSurface {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TextSurface {
    /// Surface covering `size` pixels
    pub fn new(size: Vec2) -> Self {
        let cols = (size.x / TILE_SIZE).ceil().max(0.0) as usize;
        let rows = (size.y / TILE_SIZE).ceil().max(0.0) as usize;
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    fn put(&mut self, at: Vec2, ch: char) {
        if at.x < 0.0 || at.y < 0.0 {
            return;
        }
        let col = (at.x / TILE_SIZE) as usize;
        let row = (at.y / TILE_SIZE) as usize;
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }

    /// Character at (row, col), if inside the surface
    pub fn at(&self, row: usize, col: usize) -> Option<char> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }
}

fn sprite_char(sprite: Sprite, rotation: f32) -> char {
    match sprite {
        Sprite::Wall(_) => '#',
        Sprite::Avatar => match ((rotation / FRAC_PI_2).round() as i32).rem_euclid(4) {
            0 => '^',
            1 => '>',
            2 => 'v',
            _ => '<',
        },
        Sprite::Adversary(_) => 'M',
        Sprite::ScaredAdversary => 'w',
        Sprite::PowerUp => 'o',
    }
}

impl DrawSurface for TextSurface {
    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn draw_sprite(&mut self, sprite: Sprite, top_left: Vec2, size: Vec2, rotation: f32) {
        self.put(top_left + size / 2.0, sprite_char(sprite, rotation));
    }

    fn draw_glyph(&mut self, _glyph: char, position: Vec2, _font_size: f32) {
        self.put(position, '.');
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CANVAS_SIZE;
    use crate::renderer::render_frame;
    use crate::sim::{GameState, maze::DEFAULT_LEVEL};

    #[test]
    fn test_builtin_frame_matches_level() {
        let state = GameState::new(1);
        let mut surface = TextSurface::new(state.maze.size());
        render_frame(&state, &mut surface);

        assert_eq!(surface.at(0, 0), Some('#'));
        assert_eq!(surface.at(1, 1), Some('^'));
        assert_eq!(surface.at(1, 6), Some('M'));
        assert_eq!(surface.at(11, 9), Some('o'));
        assert_eq!(surface.at(2, 1), Some('.'));

        let text = surface.to_string();
        assert_eq!(text.lines().count(), DEFAULT_LEVEL.len());
        assert!(text.lines().all(|l| l.chars().count() <= 11));
    }

    #[test]
    fn test_canvas_surface_fits_builtin_level() {
        let state = GameState::new(1);
        let mut surface = TextSurface::new(CANVAS_SIZE);
        render_frame(&state, &mut surface);

        assert_eq!(surface.at(12, 10), Some('#'));
        assert_eq!(surface.at(12, 14), Some(' '));
        assert_eq!(surface.at(13, 0), None);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut surface = TextSurface::new(Vec2::new(80.0, 40.0));
        surface.draw_sprite(Sprite::PowerUp, Vec2::new(-50.0, 0.0), Vec2::splat(16.0), 0.0);
        surface.draw_sprite(Sprite::PowerUp, Vec2::new(500.0, 0.0), Vec2::splat(16.0), 0.0);
        assert_eq!(surface.to_string(), "\n");
    }
}
