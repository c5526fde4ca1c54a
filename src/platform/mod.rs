//! Platform abstraction layer
//!
//! The simulation core owns no window, keyboard, or wall clock. Embedders
//! supply three collaborators:
//! - [`InputSource`]: discrete key-down edges + continuous directional state
//! - [`Clock`]: monotonic milliseconds + the frame-rate limiter
//! - [`FrameSink`]: consumes one frame of state per tick, plus the menu,
//!   instructions, and game-over screens; nothing flows back to the core
//!
//! Sprite loading and any fallback rendering live entirely inside sink
//! implementations.

use std::thread;
use std::time::{Duration, Instant};

use glam::IVec2;

use crate::consts::TICK_MS;
use crate::settings::Difficulty;
use crate::sim::{Directions, GamePhase, GameState, Rect};

/// Discrete key-down events, drained once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    PauseToggle,
    Help,
    Restart,
    Quit,
    SelectDifficulty(Difficulty),
    Confirm,
    /// Any other key-down; dismisses blocking overlays
    Other,
}

pub trait InputSource {
    /// Drain the key-down events seen since the last call.
    fn poll(&mut self) -> Vec<ControlEvent>;

    /// Current directional hold state.
    fn directions(&mut self) -> Directions;
}

pub trait Clock {
    /// Monotonic milliseconds since the session started.
    fn elapsed_ms(&mut self) -> u64;

    /// Block until the next tick boundary.
    fn await_next_tick(&mut self);
}

/// Everything a renderer needs for one visible frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub player: IVec2,
    pub enemy: IVec2,
    pub carrot: Option<IVec2>,
    pub apple: Option<IVec2>,
    pub poison: Option<IVec2>,
    pub obstacles: &'a [Rect],
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub paused: bool,
}

impl<'a> Frame<'a> {
    pub fn of(state: &'a GameState, high_score: u32) -> Self {
        Self {
            player: state.player,
            enemy: state.enemy,
            carrot: state.carrot,
            apple: state.apple,
            poison: state.poison,
            obstacles: &state.obstacles,
            score: state.score,
            level: state.level,
            high_score,
            paused: state.phase == GamePhase::Paused,
        }
    }
}

pub trait FrameSink {
    /// Present one frame of a live run (including the paused overlay).
    fn present(&mut self, frame: &Frame<'_>);

    /// Present the difficulty-select menu.
    fn present_menu(&mut self, selected: Difficulty, high_score: u32);

    /// Present the instructions overlay.
    fn present_instructions(&mut self);

    /// Present the end-of-run screen. Any exit animation belongs to the
    /// sink; the session blocks on input, not on this call.
    fn present_game_over(&mut self, score: u32, high_score: u32);
}

/// Wall-clock implementation for the shipped binary: `Instant`-based elapsed
/// time and a sleep-the-remainder limiter at the tick rate.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    frame_start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_start: now,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn await_next_tick(&mut self) {
        let budget = Duration::from_millis(TICK_MS);
        let elapsed = self.frame_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
        self.frame_start = Instant::now();
    }
}
