//! Maze Chase - a tile-maze chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, collisions, pathing, game state)
//! - `renderer`: Draw-surface boundary the simulation is presented through
//! - `session`: Start/pause/resume/restart/quit lifecycle around the tick loop
//! - `settings`: Data-driven game tuning

pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Simulation tick rate. Per-tick speeds below are tuned for it.
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f32 = 1000.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the session (ms)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Side of one maze cell
    pub const TILE_SIZE: f32 = 40.0;
    /// Playfield dimensions of the built-in level
    pub const CANVAS_SIZE: Vec2 = Vec2::new(600.0, 500.0);

    /// Avatar defaults
    pub const AVATAR_RADIUS: f32 = 15.0;
    /// Distance moved per tick while a direction is held
    pub const AVATAR_SPEED: f32 = 2.0;

    /// Adversary defaults
    pub const ADVERSARY_RADIUS: f32 = 15.0;
    pub const ADVERSARY_SPEED: f32 = 1.0;

    /// Collectible capture radius and reward
    pub const COLLECTIBLE_RADIUS: f32 = 3.0;
    pub const COLLECTIBLE_SCORE: u64 = 50;

    /// Power-up capture radius
    pub const POWER_UP_RADIUS: f32 = 8.0;
    /// How long a power-up keeps adversaries threatened
    pub const THREATENED_DURATION_MS: u32 = 5000;
}

/// Top-left corner of the cell at (row, col)
#[inline]
pub fn tile_origin(row: usize, col: usize) -> Vec2 {
    Vec2::new(col as f32 * consts::TILE_SIZE, row as f32 * consts::TILE_SIZE)
}

/// Center of the cell at (row, col)
#[inline]
pub fn tile_center(row: usize, col: usize) -> Vec2 {
    tile_origin(row, col) + Vec2::splat(consts::TILE_SIZE / 2.0)
}

/// Convert a wall-clock duration to a whole number of simulation ticks (rounded up)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    (u64::from(ms) * u64::from(consts::TICK_RATE)).div_ceil(1000)
}
