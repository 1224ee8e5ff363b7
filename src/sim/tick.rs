//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one tick. Per-tick order:
//!
//! 1. expire threatened windows that ran out
//! 2. steer the avatar toward the input intent (probing walls first)
//! 3. avatar vs adversaries: capture threatened ones, otherwise lose
//! 4. no collectibles left: win
//! 5. power-up pickups (threaten every live adversary)
//! 6. collectible pickups (score)
//! 7. stop the avatar if its actual velocity runs into a wall
//! 8. move the avatar
//! 9. move and steer each adversary
//! 10. update the avatar's facing

use super::collision::{overlapping, touching};
use super::direction::Direction;
use super::pathing;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Direction the avatar should try to travel, last-key-wins
    pub intent: Option<Direction>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Only a running game advances. Won/Lost are terminal until reset.
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    expire_threats(state);

    if let Some(dir) = input.intent {
        let speed = state.rules.avatar_speed;
        state.avatar.steer(dir, speed, state.maze.walls());
    }

    if resolve_adversary_contacts(state) {
        return;
    }

    if state.collectibles.is_empty() {
        log::info!("All collectibles eaten, final score {}", state.score);
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won { score: state.score });
        return;
    }

    collect_power_ups(state);
    collect_collectibles(state);

    state.avatar.stop_if_blocked(state.maze.walls());
    state.avatar.integrate();

    let walls = state.maze.walls();
    for adversary in &mut state.adversaries {
        pathing::update(adversary, walls, &mut state.rng);
    }

    state.avatar.update_facing();
}

fn expire_threats(state: &mut GameState) {
    let now = state.time_ticks;
    for adversary in &mut state.adversaries {
        if adversary.expire_threats(now) {
            log::debug!("Adversary {} no longer threatened", adversary.id);
            state.events.push(GameEvent::ThreatExpired { id: adversary.id });
        }
    }
}

/// Returns true if the game was lost
fn resolve_adversary_contacts(state: &mut GameState) -> bool {
    let avatar = &state.avatar;
    for i in (0..state.adversaries.len()).rev() {
        let adversary = &state.adversaries[i];
        if !touching(adversary.pos, avatar.pos, adversary.radius + avatar.radius) {
            continue;
        }

        if adversary.threatened {
            let id = adversary.id;
            state.adversaries.remove(i);
            log::debug!("Adversary {} captured", id);
            state.events.push(GameEvent::AdversaryCaptured { id });
        } else {
            log::info!(
                "Caught by adversary {} at tick {}, final score {}",
                adversary.id,
                state.time_ticks,
                state.score
            );
            state.phase = GamePhase::Lost;
            state.events.push(GameEvent::Lost { score: state.score });
            return true;
        }
    }
    false
}

fn collect_power_ups(state: &mut GameState) {
    let avatar_pos = state.avatar.pos;
    let avatar_radius = state.avatar.radius;
    let until = state.time_ticks + state.rules.threatened_ticks;

    for i in (0..state.power_ups.len()).rev() {
        let power_up = state.power_ups[i];
        if !overlapping(power_up.pos, avatar_pos, power_up.radius + avatar_radius) {
            continue;
        }

        state.power_ups.remove(i);
        for adversary in &mut state.adversaries {
            adversary.threaten(until);
        }
        let threatened = state.adversaries.len();
        log::debug!(
            "Power-up {} taken, {} adversaries threatened until tick {}",
            power_up.id,
            threatened,
            until
        );
        state.events.push(GameEvent::PowerUpTaken {
            id: power_up.id,
            threatened,
        });
    }
}

fn collect_collectibles(state: &mut GameState) {
    let avatar_pos = state.avatar.pos;
    let avatar_radius = state.avatar.radius;

    for i in (0..state.collectibles.len()).rev() {
        let collectible = state.collectibles[i];
        if !overlapping(collectible.pos, avatar_pos, collectible.radius + avatar_radius) {
            continue;
        }

        state.collectibles.remove(i);
        state.score += state.rules.collectible_score;
        state.events.push(GameEvent::CollectibleEaten {
            id: collectible.id,
            score: state.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::maze::MazeLayout;
    use crate::sim::state::{Facing, Rules};
    use crate::tile_center;

    /// Wall-free 8x4 field with pellets in row 3 so a game never wins by accident
    fn open_field(avatar: Vec2) -> GameState {
        let maze = MazeLayout::parse(&["        ", "        ", "        ", "..     ."]);
        let mut state = GameState::from_layout(5, Rules::default(), maze, avatar);
        state.start();
        state
    }

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    fn go(intent: Direction) -> TickInput {
        TickInput {
            intent: Some(intent),
        }
    }

    #[test]
    fn test_tick_ignored_unless_playing() {
        let mut state = GameState::new(1);
        tick(&mut state, &go(Direction::Down));
        assert_eq!(state.time_ticks, 0);

        state.start();
        state.pause();
        let adversary_pos = state.adversaries[0].pos;
        tick(&mut state, &go(Direction::Down));
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.adversaries[0].pos, adversary_pos);
    }

    #[test]
    fn test_avatar_blocked_at_wall() {
        let mut state = playing(1);
        // (60,60) has the border to the left and above
        tick(&mut state, &go(Direction::Left));
        assert_eq!(state.avatar.vel, Vec2::ZERO);
        assert_eq!(state.avatar.pos, Vec2::new(60.0, 60.0));
        tick(&mut state, &go(Direction::Up));
        assert_eq!(state.avatar.pos, Vec2::new(60.0, 60.0));
        assert_eq!(state.avatar.facing, Facing::Up);

        tick(&mut state, &go(Direction::Down));
        assert_eq!(state.avatar.pos, Vec2::new(60.0, 62.0));
        assert_eq!(state.avatar.facing, Facing::Down);
    }

    #[test]
    fn test_avatar_never_passes_padded_boundary() {
        let mut state = playing(1);
        state.avatar.pos = tile_center(1, 3);
        state.adversaries.clear();
        for _ in 0..120 {
            tick(&mut state, &go(Direction::Left));
            // Left wall's padded edge sits at x = 44
            assert!(state.avatar.pos.x - state.avatar.radius >= 44.0);
        }
        assert_eq!(state.avatar.pos.x, 60.0);
        assert_eq!(state.avatar.vel.x, 0.0);
        assert_eq!(state.avatar.facing, Facing::Left);
    }

    #[test]
    fn test_velocity_persists_without_intent() {
        let mut state = playing(1);
        state.adversaries.clear();
        tick(&mut state, &go(Direction::Right));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.avatar.pos, Vec2::new(64.0, 60.0));
    }

    #[test]
    fn test_collectible_capture_scores() {
        let mut state = open_field(tile_center(3, 0));
        let before = state.remaining_collectibles();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.remaining_collectibles(), before - 1);
        assert_eq!(state.score, 50);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::CollectibleEaten { score: 50, .. }]
        ));
    }

    #[test]
    fn test_win_signaled_once() {
        let maze = MazeLayout::parse(&["   ", " . ", "   "]);
        let mut state = GameState::from_layout(5, Rules::default(), maze, tile_center(1, 1));
        state.start();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.remaining_collectibles(), 0);
        assert_eq!(state.phase, GamePhase::Playing);

        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Won);
        let wins = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Won { .. }))
            .count();
        assert_eq!(wins, 1);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_unthreatened_contact_loses_once() {
        let mut state = open_field(tile_center(1, 1));
        state.spawn_adversary(0, tile_center(1, 1) + Vec2::new(29.0, 0.0), Direction::Right);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Lost);
        tick(&mut state, &TickInput::default());
        let losses = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Lost { .. }))
            .count();
        assert_eq!(losses, 1);
    }

    #[test]
    fn test_threatened_contact_captures() {
        let mut state = open_field(tile_center(1, 1));
        let near = state.spawn_adversary(0, tile_center(1, 1), Direction::Right);
        let far = state.spawn_adversary(1, tile_center(1, 6), Direction::Right);
        for adversary in &mut state.adversaries {
            adversary.threaten(1000);
        }

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.adversaries.len(), 1);
        assert_eq!(state.adversaries[0].id, far);
        assert!(state.drain_events().contains(&GameEvent::AdversaryCaptured { id: near }));
    }

    #[test]
    fn test_power_up_threatens_then_expires() {
        let maze = MazeLayout::parse(&["p       ", "        ", "        ", "       ."]);
        let mut state = GameState::from_layout(5, Rules::default(), maze, tile_center(0, 0));
        state.spawn_adversary(0, tile_center(2, 2), Direction::Right);
        state.spawn_adversary(1, tile_center(1, 4), Direction::Left);
        state.start();

        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        assert!(state.adversaries.iter().all(|a| a.threatened));

        for _ in 0..299 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, 300);
        assert!(state.adversaries.iter().all(|a| a.threatened));

        tick(&mut state, &TickInput::default());
        assert!(state.adversaries.iter().all(|a| !a.threatened));
        let expired = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ThreatExpired { .. }))
            .count();
        assert_eq!(expired, 2);
    }

    #[test]
    fn test_second_power_up_does_not_extend_first_window() {
        let maze = MazeLayout::parse(&["p      p", "        ", "        ", "       ."]);
        let mut state = GameState::from_layout(5, Rules::default(), maze, tile_center(0, 0));
        state.spawn_adversary(0, tile_center(2, 0), Direction::Right);
        state.start();

        tick(&mut state, &TickInput::default());
        for _ in 0..99 {
            tick(&mut state, &TickInput::default());
        }
        state.avatar.pos = tile_center(0, 7);
        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.adversaries[0].threat_expiries, vec![301, 401]);

        state.avatar.pos = tile_center(3, 3);
        while state.time_ticks < 301 {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.adversaries[0].threatened);

        while state.time_ticks < 401 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.adversaries[0].threat_expiries.is_empty());
        let expired = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ThreatExpired { .. }))
            .count();
        assert_eq!(expired, 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);

        let inputs = [
            go(Direction::Down),
            TickInput::default(),
            go(Direction::Right),
            go(Direction::Up),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.avatar, state2.avatar);
        assert_eq!(state1.adversaries, state2.adversaries);
    }
}
