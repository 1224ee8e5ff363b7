//! Maze Chase entry point
//!
//! Runs a headless session driven by a simple autopilot and prints the
//! final board. Usage: `maze-chase [settings.json]`

use maze_chase::consts::*;
use maze_chase::renderer::TextSurface;
use maze_chase::sim::{Direction, GamePhase, GameState, blocked_by_any};
use maze_chase::{Session, Settings};

/// Give up after two minutes of game time
const MAX_FRAMES: u32 = TICK_RATE * 120;

fn main() {
    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let mut session = match Session::new(settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot build maze: {}", e);
            std::process::exit(1);
        }
    };
    session.start();

    let mut held: Option<Direction> = None;
    for _ in 0..MAX_FRAMES {
        let choice = autopilot(session.state());
        if choice != held {
            if let Some(dir) = held {
                session.release(dir);
            }
            if let Some(dir) = choice {
                session.press(dir);
            }
            held = choice;
        }

        for event in session.advance(SIM_DT_MS) {
            match serde_json::to_string(&event) {
                Ok(json) => log::debug!("{}", json),
                Err(e) => log::warn!("Failed to encode event: {}", e),
            }
        }

        if session.phase().is_over() {
            break;
        }
    }

    let state = session.state();
    let mut surface = TextSurface::new(CANVAS_SIZE);
    session.render(&mut surface);
    println!("{}", surface);

    match state.phase {
        GamePhase::Won => println!("You win! Score: {}", state.score),
        GamePhase::Lost => println!("Caught! Score: {}", state.score),
        _ => println!(
            "Out of time. Score: {} ({} left)",
            state.score,
            state.remaining_collectibles()
        ),
    }
}

/// Head for the nearest collectible along whichever open direction closes
/// the distance most
fn autopilot(state: &GameState) -> Option<Direction> {
    let avatar = &state.avatar;
    let target = state
        .collectibles
        .iter()
        .map(|c| c.pos)
        .min_by(|a, b| {
            a.distance_squared(avatar.pos)
                .total_cmp(&b.distance_squared(avatar.pos))
        })?;

    Direction::ALL
        .into_iter()
        .filter(|dir| {
            let probe = avatar
                .circle()
                .with_velocity(dir.velocity(state.rules.avatar_speed));
            !blocked_by_any(&probe, state.walls())
        })
        .min_by(|a, b| {
            let da = (avatar.pos + a.unit() * TILE_SIZE).distance_squared(target);
            let db = (avatar.pos + b.unit() * TILE_SIZE).distance_squared(target);
            da.total_cmp(&db)
        })
}
