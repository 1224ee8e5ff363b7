//! Adversary wandering
//!
//! Adversaries have no notion of where the avatar is. Each tick they probe
//! all four directions against the walls and remember which ones were
//! blocked. While the blocked set only grows (walking down a corridor) they
//! keep their heading; once it changes shape (an opening appears, or the
//! corridor turns) they pick uniformly among the remembered directions that
//! are open now, including the one they were travelling in.

use rand::Rng;

use super::collision::blocked_by_any;
use super::direction::{Direction, DirectionSet};
use super::maze::Wall;
use super::state::Adversary;

/// Directions in which a step of `speed` would hit a wall
pub fn blocked_directions(adversary: &Adversary, walls: &[Wall]) -> DirectionSet {
    let circle = adversary.circle();
    Direction::ALL
        .into_iter()
        .filter(|dir| blocked_by_any(&circle.with_velocity(dir.velocity(adversary.speed)), walls))
        .collect()
}

/// Advance one adversary: move, then re-evaluate its heading.
///
/// Returns the newly chosen direction when a turn decision was made.
pub fn update<R: Rng>(
    adversary: &mut Adversary,
    walls: &[Wall],
    rng: &mut R,
) -> Option<Direction> {
    adversary.pos += adversary.vel;
    steer(adversary, walls, rng)
}

/// Re-evaluate the heading at the current position without moving
pub fn steer<R: Rng>(
    adversary: &mut Adversary,
    walls: &[Wall],
    rng: &mut R,
) -> Option<Direction> {
    let blocked = blocked_directions(adversary, walls);

    if blocked.len() > adversary.pending.len() {
        adversary.pending = blocked;
    }

    if blocked != adversary.pending {
        if let Some(heading) = adversary.heading() {
            adversary.pending.insert(heading);
        }
        let choices = adversary.pending.difference(blocked);
        adversary.pending.clear();
        adversary.stalled = false;
        return turn(adversary, choices, rng);
    }

    // Nothing changed but the heading runs into a wall (a dead end). Allow
    // one tick of overshoot, which is how ordinary corners resolve, then
    // pick among everything that is open.
    match adversary.heading() {
        Some(heading) if blocked.contains(heading) => {
            if !adversary.stalled {
                adversary.stalled = true;
                return None;
            }
            adversary.stalled = false;
            let open = DirectionSet::from_iter(Direction::ALL).difference(blocked);
            if open.is_empty() {
                log::warn!("Adversary {} is boxed in, stopping", adversary.id);
                adversary.vel = glam::Vec2::ZERO;
                return None;
            }
            adversary.pending.clear();
            turn(adversary, open, rng)
        }
        _ => {
            adversary.stalled = false;
            None
        }
    }
}

fn turn<R: Rng>(
    adversary: &mut Adversary,
    choices: DirectionSet,
    rng: &mut R,
) -> Option<Direction> {
    if choices.is_empty() {
        return None;
    }
    let pick = rng.random_range(0..choices.len());
    let dir = choices.iter().nth(pick)?;
    adversary.vel = dir.velocity(adversary.speed);
    log::trace!(
        "Adversary {} turns {:?} (choices {:?})",
        adversary.id,
        dir,
        choices
    );
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::MazeLayout;
    use crate::tile_center;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Corridor along row 1 that turns down at column 3
    const ELBOW: &[&str] = &[
        "-----",
        "-   -",
        "--- -",
        "--- -",
        "-----",
    ];

    /// Three-cell corridor closed at both ends
    const DEAD_END: &[&str] = &["-----", "-   -", "-----"];

    #[test]
    fn test_blocked_directions_in_corridor() {
        let maze = MazeLayout::parse(ELBOW);
        let adversary = Adversary::new(1, 0, tile_center(1, 2), Direction::Right, 1.0);
        let blocked = blocked_directions(&adversary, maze.walls());
        let expected: DirectionSet = [Direction::Up, Direction::Down].into_iter().collect();
        assert_eq!(blocked, expected);
    }

    #[test]
    fn test_keeps_heading_down_corridor() {
        let maze = MazeLayout::parse(ELBOW);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut adversary = Adversary::new(1, 0, tile_center(1, 1), Direction::Right, 1.0);
        for _ in 0..79 {
            assert_eq!(update(&mut adversary, maze.walls(), &mut rng), None);
        }
        assert_eq!(adversary.pos.x, 139.0);
    }

    #[test]
    fn test_turns_at_elbow() {
        let maze = MazeLayout::parse(ELBOW);
        for seed in 0..16 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut adversary = Adversary::new(1, 0, tile_center(1, 1), Direction::Right, 1.0);
            let mut choice = None;
            for _ in 0..80 {
                choice = update(&mut adversary, maze.walls(), &mut rng);
            }
            // Down is the only remembered direction that is open at the corner
            assert_eq!(choice, Some(Direction::Down));
            assert_eq!(adversary.vel, glam::Vec2::new(0.0, 1.0));
            assert!(adversary.pending.is_empty());
        }
    }

    #[test]
    fn test_never_picks_blocked_direction() {
        let maze = MazeLayout::builtin();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut adversary = Adversary::new(1, 0, tile_center(1, 6), Direction::Right, 1.0);
        let mut turns = 0;
        for _ in 0..5000 {
            if let Some(dir) = update(&mut adversary, maze.walls(), &mut rng) {
                turns += 1;
                assert!(!blocked_directions(&adversary, maze.walls()).contains(dir));
            }
        }
        assert!(turns > 0);
    }

    #[test]
    fn test_dead_end_reverses() {
        let maze = MazeLayout::parse(DEAD_END);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut adversary = Adversary::new(1, 0, tile_center(1, 2), Direction::Right, 1.0);
        let mut reversed = false;
        for _ in 0..60 {
            if update(&mut adversary, maze.walls(), &mut rng) == Some(Direction::Left) {
                reversed = true;
                break;
            }
        }
        assert!(reversed);
        // Never further than one tick of overshoot into the padded wall
        assert!(adversary.pos.x <= 141.0);
    }
}
