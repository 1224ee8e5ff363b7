//! Game session lifecycle
//!
//! Owns the simulation state, the held-key tracker and the frame-time
//! accumulator. Hosts call [`Session::advance`] once per display frame with
//! the elapsed wall time; the session runs as many fixed ticks as that time
//! covers. Restart and quit replace the whole state, so no ticks scheduled
//! against the old game can ever reach the new one.

use crate::consts::{MAX_FRAME_MS, SIM_DT_MS};
use crate::renderer::{DrawSurface, render_frame};
use crate::settings::Settings;
use crate::sim::{
    Direction, GameEvent, GamePhase, GameState, InputTracker, MazeError, MazeLayout, tick,
};

pub struct Session {
    settings: Settings,
    layout: MazeLayout,
    state: GameState,
    input: InputTracker,
    accumulator: f32,
}

impl Session {
    /// New session waiting in [`GamePhase::Ready`]
    pub fn new(settings: Settings) -> Result<Self, MazeError> {
        let layout = settings.layout()?;
        let state = Self::fresh_state(&settings, &layout);
        Ok(Self {
            settings,
            layout,
            state,
            input: InputTracker::new(),
            accumulator: 0.0,
        })
    }

    fn fresh_state(settings: &Settings, layout: &MazeLayout) -> GameState {
        let seed = settings.seed_or_clock();
        log::info!("New game (seed {})", seed);
        GameState::with_layout(seed, settings.rules(), layout.clone())
    }

    fn reset(&mut self) {
        self.state = Self::fresh_state(&self.settings, &self.layout);
        self.input.clear();
        self.accumulator = 0.0;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    pub fn pause(&mut self) -> bool {
        self.state.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.accumulator = 0.0;
        self.state.resume()
    }

    /// Toggle between playing and paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Throw the current game away and start a new one.
    ///
    /// `confirmed` is the host's answer to "restart?"; a declined prompt
    /// leaves everything untouched.
    pub fn restart(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        log::info!("Restarting (score was {})", self.state.score);
        self.reset();
        self.state.start()
    }

    /// Throw the current game away and go back to the title (Ready)
    pub fn quit(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        log::info!("Quit to title (score was {})", self.state.score);
        self.reset();
        true
    }

    pub fn press(&mut self, dir: Direction) {
        self.input.press(dir);
    }

    pub fn release(&mut self, dir: Direction) {
        self.input.release(dir);
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Run the ticks covered by `frame_ms` of wall time and return the events
    /// they produced
    pub fn advance(&mut self, frame_ms: f32) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::Playing {
            self.accumulator = 0.0;
            return self.state.drain_events();
        }

        self.accumulator += frame_ms.max(0.0).min(MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < self.settings.max_substeps {
            tick(&mut self.state, &self.input.tick_input());
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            if self.state.phase != GamePhase::Playing {
                self.accumulator = 0.0;
                break;
            }
        }
        // Time the substep cap dropped is not carried into later frames
        self.accumulator = self
            .accumulator
            .min(SIM_DT_MS * self.settings.max_substeps as f32);

        self.state.drain_events()
    }

    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        render_frame(&self.state, surface);
    }
}
