//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there is no
//! module-level mutable state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, blocked_by_any};
use super::direction::{Direction, DirectionSet};
use super::maze::{DEFAULT_ADVERSARY_SPAWNS, DEFAULT_AVATAR_SPAWN, MazeLayout, Wall};
use crate::consts::*;
use crate::{ms_to_ticks, tile_center};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Built but not started (title screen)
    Ready,
    /// Ticks are being processed
    Playing,
    /// Ticks suspended, state untouched
    Paused,
    /// Every collectible eaten
    Won,
    /// Avatar touched an adversary that was not threatened
    Lost,
}

impl GamePhase {
    /// Won and Lost end the session until it is reset
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    CollectibleEaten { id: u32, score: u64 },
    PowerUpTaken { id: u32, threatened: usize },
    AdversaryCaptured { id: u32 },
    ThreatExpired { id: u32 },
    Won { score: u64 },
    Lost { score: u64 },
}

/// Which way the avatar sprite points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    /// Sprite rotation in radians, clockwise from the unrotated (upward) sprite
    pub fn rotation(self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Facing::Up => 0.0,
            Facing::Right => FRAC_PI_2,
            Facing::Down => PI,
            Facing::Left => PI + FRAC_PI_2,
        }
    }
}

/// The player-controlled avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub facing: Facing,
}

impl Avatar {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: AVATAR_RADIUS,
            facing: Facing::default(),
        }
    }

    /// Collision shape carrying the current velocity
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius, self.vel)
    }

    /// Try to head `dir` at `speed`.
    ///
    /// Only the axis of `dir` is touched: it becomes `speed` if the move is
    /// clear of every wall, otherwise 0. The other axis keeps its value.
    pub fn steer(&mut self, dir: Direction, speed: f32, walls: &[Wall]) {
        let candidate = dir.velocity(speed);
        let blocked = blocked_by_any(&self.circle().with_velocity(candidate), walls);
        match dir {
            Direction::Up | Direction::Down => {
                self.vel.y = if blocked { 0.0 } else { candidate.y };
            }
            Direction::Left | Direction::Right => {
                self.vel.x = if blocked { 0.0 } else { candidate.x };
            }
        }
    }

    /// Zero the whole velocity if it would carry the avatar into a wall
    pub fn stop_if_blocked(&mut self, walls: &[Wall]) -> bool {
        let blocked = blocked_by_any(&self.circle(), walls);
        if blocked {
            self.vel = Vec2::ZERO;
        }
        blocked
    }

    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Recompute facing from the sign of the velocity. Standing still keeps it.
    pub fn update_facing(&mut self) {
        if let Some(dir) = Direction::of_velocity(self.vel) {
            self.facing = match dir {
                Direction::Right => Facing::Right,
                Direction::Left => Facing::Left,
                Direction::Down => Facing::Down,
                Direction::Up => Facing::Up,
            };
        }
    }
}

/// A roaming adversary
#[derive(Debug, Clone, PartialEq)]
pub struct Adversary {
    pub id: u32,
    /// Which of the adversary sprites to draw
    pub sprite: usize,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Capturable instead of lethal
    pub threatened: bool,
    /// Ticks at which a pending threatened window runs out, one per power-up
    pub threat_expiries: Vec<u64>,
    /// Directions remembered as blocked since the last turn
    pub pending: DirectionSet,
    /// Heading was blocked on the previous evaluation with nothing else changing
    pub stalled: bool,
}

impl Adversary {
    pub fn new(id: u32, sprite: usize, pos: Vec2, heading: Direction, speed: f32) -> Self {
        Self {
            id,
            sprite,
            pos,
            vel: heading.velocity(speed),
            radius: ADVERSARY_RADIUS,
            speed,
            threatened: false,
            threat_expiries: Vec::new(),
            pending: DirectionSet::EMPTY,
            stalled: false,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius, self.vel)
    }

    pub fn heading(&self) -> Option<Direction> {
        Direction::of_velocity(self.vel)
    }

    /// Start a threatened window ending at `until`.
    ///
    /// Windows overlap rather than extend: an earlier window still reverts
    /// the flag when it runs out.
    pub fn threaten(&mut self, until: u64) {
        self.threatened = true;
        self.threat_expiries.push(until);
    }

    /// Drop windows that ran out by `now`. Returns true only when this
    /// clears a set threatened flag.
    pub fn expire_threats(&mut self, now: u64) -> bool {
        let before = self.threat_expiries.len();
        self.threat_expiries.retain(|&t| t > now);
        if self.threat_expiries.len() == before {
            return false;
        }
        std::mem::replace(&mut self.threatened, false)
    }
}

/// A pellet worth points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

/// A power-up that threatens every adversary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

/// Tunable rules of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub avatar_speed: f32,
    pub adversary_speed: f32,
    pub collectible_score: u64,
    /// Length of a threatened window in ticks
    pub threatened_ticks: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            avatar_speed: AVATAR_SPEED,
            adversary_speed: ADVERSARY_SPEED,
            collectible_score: COLLECTIBLE_SCORE,
            threatened_ticks: ms_to_ticks(THREATENED_DURATION_MS),
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Drives adversary turn choices
    pub rng: Pcg32,
    pub rules: Rules,
    /// Static geometry, never mutated after construction
    pub maze: MazeLayout,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub avatar: Avatar,
    /// Live adversaries (captured ones are removed)
    pub adversaries: Vec<Adversary>,
    /// Remaining collectibles
    pub collectibles: Vec<Collectible>,
    /// Remaining power-ups
    pub power_ups: Vec<PowerUp>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Built-in level with the default rules
    pub fn new(seed: u64) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    /// Built-in level with custom rules
    pub fn with_rules(seed: u64, rules: Rules) -> Self {
        Self::with_layout(seed, rules, MazeLayout::builtin())
    }

    /// Built-in spawn positions on an already parsed layout
    pub fn with_layout(seed: u64, rules: Rules, maze: MazeLayout) -> Self {
        let (row, col) = DEFAULT_AVATAR_SPAWN;
        let mut state = Self::from_layout(seed, rules, maze, tile_center(row, col));
        for (sprite, &(row, col)) in DEFAULT_ADVERSARY_SPAWNS.iter().enumerate() {
            state.spawn_adversary(sprite, tile_center(row, col), Direction::Right);
        }
        state
    }

    /// Any layout. Collectibles and power-ups come from the layout's spawn
    /// points; adversaries are added with [`GameState::spawn_adversary`].
    pub fn from_layout(seed: u64, rules: Rules, maze: MazeLayout, avatar_spawn: Vec2) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            maze,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Ready,
            avatar: Avatar::new(avatar_spawn),
            adversaries: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        let spawns: Vec<Vec2> = state.maze.collectible_spawns().to_vec();
        for pos in spawns {
            let id = state.next_entity_id();
            state.collectibles.push(Collectible {
                id,
                pos,
                radius: COLLECTIBLE_RADIUS,
            });
        }
        let spawns: Vec<Vec2> = state.maze.power_up_spawns().to_vec();
        for pos in spawns {
            let id = state.next_entity_id();
            state.power_ups.push(PowerUp {
                id,
                pos,
                radius: POWER_UP_RADIUS,
            });
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an adversary heading `heading` at the rules' speed
    pub fn spawn_adversary(&mut self, sprite: usize, pos: Vec2, heading: Direction) -> u32 {
        let id = self.next_entity_id();
        let speed = self.rules.adversary_speed;
        self.adversaries
            .push(Adversary::new(id, sprite, pos, heading, speed));
        id
    }

    /// Ready -> Playing
    pub fn start(&mut self) -> bool {
        self.transition(GamePhase::Ready, GamePhase::Playing)
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        self.transition(GamePhase::Playing, GamePhase::Paused)
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> bool {
        self.transition(GamePhase::Paused, GamePhase::Playing)
    }

    fn transition(&mut self, from: GamePhase, to: GamePhase) -> bool {
        if self.phase != from {
            return false;
        }
        log::debug!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        true
    }

    pub fn walls(&self) -> &[Wall] {
        self.maze.walls()
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.collectibles.len()
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
