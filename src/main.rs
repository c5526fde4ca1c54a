//! Burrow Dash entry point
//!
//! Native bootstrap: initializes logging, loads the settings and the high
//! score, then runs a headless demo session in which a simple autopilot
//! chases the carrot until it gets caught or the demo budget runs out. A
//! real frontend replaces the autopilot by implementing the same platform
//! traits against a window, keyboard, and renderer.

use std::cell::RefCell;
use std::rc::Rc;

use glam::IVec2;

use burrow_dash::consts::*;
use burrow_dash::highscores::HighScore;
use burrow_dash::platform::{ControlEvent, Frame, FrameSink, InputSource, SystemClock};
use burrow_dash::session::Session;
use burrow_dash::settings::{Difficulty, Settings};
use burrow_dash::sim::{Directions, Rect};

/// Demo length cap in ticks (30 seconds at the tick rate)
const DEMO_TICK_BUDGET: u64 = 30 * TICK_HZ as u64;

/// What the autopilot remembers from the most recent frame.
#[derive(Default)]
struct Brain {
    started: bool,
    game_over: bool,
    player: IVec2,
    carrot: Option<IVec2>,
    frames: u64,
    score: u32,
    level: u32,
}

/// Input half of the autopilot: confirms the menu, quits once the run ends
/// or the budget is spent, and steers toward the last-seen carrot.
struct PilotInput {
    brain: Rc<RefCell<Brain>>,
    polls: u64,
}

impl InputSource for PilotInput {
    fn poll(&mut self) -> Vec<ControlEvent> {
        self.polls += 1;
        let mut brain = self.brain.borrow_mut();
        if !brain.started {
            brain.started = true;
            return vec![ControlEvent::Confirm];
        }
        if brain.game_over || self.polls >= DEMO_TICK_BUDGET {
            return vec![ControlEvent::Quit];
        }
        Vec::new()
    }

    fn directions(&mut self) -> Directions {
        let brain = self.brain.borrow();
        let Some(carrot) = brain.carrot else {
            return Directions::default();
        };
        let player = Rect::square(brain.player, PLAYER_SIZE).center();
        let carrot = Rect::square(carrot, ITEM_SIZE).center();
        Directions {
            left: carrot.x < player.x,
            right: carrot.x > player.x,
            up: carrot.y < player.y,
            down: carrot.y > player.y,
        }
    }
}

/// Render half of the autopilot: snapshots what the pilot steers by and
/// logs progress once per second.
struct PilotSink {
    brain: Rc<RefCell<Brain>>,
}

impl FrameSink for PilotSink {
    fn present(&mut self, frame: &Frame<'_>) {
        let mut brain = self.brain.borrow_mut();
        brain.player = frame.player;
        brain.carrot = frame.carrot;
        brain.frames += 1;
        brain.score = frame.score;
        brain.level = frame.level;
        if brain.frames % TICK_HZ as u64 == 0 {
            log::info!(
                "t={}s score={} level={} player=({},{}) enemy=({},{})",
                brain.frames / TICK_HZ as u64,
                frame.score,
                frame.level,
                frame.player.x,
                frame.player.y,
                frame.enemy.x,
                frame.enemy.y,
            );
        }
    }

    fn present_menu(&mut self, selected: Difficulty, high_score: u32) {
        log::debug!("menu: {} selected, best {}", selected.as_str(), high_score);
    }

    fn present_instructions(&mut self) {
        log::debug!("instructions overlay");
    }

    fn present_game_over(&mut self, score: u32, high_score: u32) {
        log::info!("game over screen: score {}, best {}", score, high_score);
        self.brain.borrow_mut().game_over = true;
    }
}

fn main() {
    env_logger::init();
    log::info!("Burrow Dash (headless demo) starting");

    let settings = Settings::load();
    let high_score = HighScore::load();

    // An explicit seed argument makes a demo run reproducible
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let brain = Rc::new(RefCell::new(Brain::default()));
    let input = PilotInput {
        brain: brain.clone(),
        polls: 0,
    };
    let sink = PilotSink {
        brain: brain.clone(),
    };

    let mut session = Session::new(
        input,
        SystemClock::new(),
        sink,
        settings,
        high_score,
        seed,
    );
    session.run();
    session.settings().save();

    let brain = brain.borrow();
    log::info!(
        "demo finished: {} frames, score {} at level {}, best {}",
        brain.frames,
        brain.score,
        brain.level,
        session.best_score()
    );
}
