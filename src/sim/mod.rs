//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod direction;
pub mod input;
pub mod maze;
pub mod pathing;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, blocked_by_any, overlaps, padding};
pub use direction::{Direction, DirectionSet};
pub use input::{InputTracker, key_direction};
pub use maze::{Cell, MazeError, MazeLayout, Wall, WallKind};
pub use state::{
    Adversary, Avatar, Collectible, Facing, GameEvent, GamePhase, GameState, PowerUp, Rules,
};
pub use tick::{TickInput, tick};
