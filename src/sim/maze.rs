//! Static maze layout
//!
//! A maze is a rectangular grid of single-character symbols. Each cell maps
//! to at most one wall segment, collectible, or power-up spawn point:
//!
//! | symbol | meaning |
//! |--------|---------|
//! | `-` `\|` | straight pipe |
//! | `1` `2` `3` `4` | corners (top-left, top-right, bottom-right, bottom-left) |
//! | `b` | free-standing block |
//! | `[` `]` `_` `^` | caps (left, right, bottom, top) |
//! | `+` | cross |
//! | `5` `6` `7` `8` | T-connectors (top, right, bottom, left) |
//! | `.` | collectible |
//! | `p` | power-up |
//! | space | empty floor |

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::Rect;
use crate::consts::TILE_SIZE;
use crate::{tile_center, tile_origin};

/// The built-in level
pub const DEFAULT_LEVEL: &[&str] = &[
    "1---------2",
    "| ........|",
    "|.b.[7].b.|",
    "|...._....|",
    "|.[]...[].|",
    "|....^....|",
    "|.b.[+].b.|",
    "|...._....|",
    "|.[]...[].|",
    "|....^....|",
    "|.b.[5].b.|",
    "|........p|",
    "4---------3",
];

/// Avatar spawn cell (row, col) in the built-in level
pub const DEFAULT_AVATAR_SPAWN: (usize, usize) = (1, 1);

/// Adversary spawn cells (row, col) in the built-in level
pub const DEFAULT_ADVERSARY_SPAWNS: [(usize, usize); 4] = [(1, 6), (3, 6), (8, 5), (7, 1)];

/// Visual variant of a wall segment. Collision treats them all alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    Horizontal,
    Vertical,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomRight,
    CornerBottomLeft,
    Block,
    CapLeft,
    CapRight,
    CapBottom,
    CapTop,
    Cross,
    ConnectorTop,
    ConnectorRight,
    ConnectorBottom,
    ConnectorLeft,
}

/// What a single maze symbol spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall(WallKind),
    Collectible,
    PowerUp,
    Floor,
}

impl Cell {
    /// Decode a maze symbol, `None` for unrecognized symbols
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        let kind = match symbol {
            '-' => WallKind::Horizontal,
            '|' => WallKind::Vertical,
            '1' => WallKind::CornerTopLeft,
            '2' => WallKind::CornerTopRight,
            '3' => WallKind::CornerBottomRight,
            '4' => WallKind::CornerBottomLeft,
            'b' => WallKind::Block,
            '[' => WallKind::CapLeft,
            ']' => WallKind::CapRight,
            '_' => WallKind::CapBottom,
            '^' => WallKind::CapTop,
            '+' => WallKind::Cross,
            '5' => WallKind::ConnectorTop,
            '6' => WallKind::ConnectorRight,
            '7' => WallKind::ConnectorBottom,
            '8' => WallKind::ConnectorLeft,
            '.' => return Some(Cell::Collectible),
            'p' => return Some(Cell::PowerUp),
            ' ' => return Some(Cell::Floor),
            _ => return None,
        };
        Some(Cell::Wall(kind))
    }
}

/// An immovable wall segment covering one maze cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub kind: WallKind,
    pub rect: Rect,
}

/// Errors from strict maze parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("unknown maze symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
    #[error("maze row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Parsed, immutable maze geometry and spawn points
#[derive(Debug, Clone, Default)]
pub struct MazeLayout {
    rows: usize,
    cols: usize,
    walls: Vec<Wall>,
    collectible_spawns: Vec<Vec2>,
    power_up_spawns: Vec<Vec2>,
}

impl MazeLayout {
    /// Parse leniently: unknown symbols are skipped and ragged rows accepted
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> MazeLayout {
        let mut layout = MazeLayout::default();
        for (row, line) in rows.iter().enumerate() {
            let mut width = 0;
            for (col, symbol) in line.as_ref().chars().enumerate() {
                width = col + 1;
                match Cell::from_symbol(symbol) {
                    Some(cell) => layout.place(row, col, cell),
                    None => log::trace!("Ignoring maze symbol {symbol:?} at ({row}, {col})"),
                }
            }
            layout.cols = layout.cols.max(width);
        }
        layout.rows = rows.len();
        layout
    }

    /// Parse, rejecting unknown symbols and non-rectangular grids
    pub fn parse_strict<S: AsRef<str>>(rows: &[S]) -> Result<MazeLayout, MazeError> {
        let expected = rows.first().ok_or(MazeError::Empty)?.as_ref().chars().count();
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != expected {
                return Err(MazeError::Ragged {
                    row,
                    expected,
                    found,
                });
            }
            if let Some((col, symbol)) = line
                .chars()
                .enumerate()
                .find(|(_, s)| Cell::from_symbol(*s).is_none())
            {
                return Err(MazeError::UnknownSymbol { row, col, symbol });
            }
        }

        Ok(Self::parse(rows))
    }

    /// The built-in level
    pub fn builtin() -> MazeLayout {
        Self::parse(DEFAULT_LEVEL)
    }

    fn place(&mut self, row: usize, col: usize, cell: Cell) {
        match cell {
            Cell::Wall(kind) => self.walls.push(Wall {
                kind,
                rect: Rect::new(tile_origin(row, col), TILE_SIZE, TILE_SIZE),
            }),
            Cell::Collectible => self.collectible_spawns.push(tile_center(row, col)),
            Cell::PowerUp => self.power_up_spawns.push(tile_center(row, col)),
            Cell::Floor => {}
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn collectible_spawns(&self) -> &[Vec2] {
        &self.collectible_spawns
    }

    pub fn power_up_spawns(&self) -> &[Vec2] {
        &self.power_up_spawns
    }

    /// Pixel extent of the grid
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32) * TILE_SIZE
    }
}
