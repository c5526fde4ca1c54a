//! Fixed-rate simulation tick
//!
//! One call advances the run by one tick, reproducing the observable order:
//! pause toggle, boost expiry, player movement, history append, pursuit,
//! carrot/apple/poison resolution, level progression, terminal checks.
//! Rendering is the caller's job and happens after the tick returns.

use glam::IVec2;
use rand::Rng;

use super::geometry::{Rect, any_overlap};
use super::pursuit::pursue;
use super::spawn::{place_non_overlapping, place_one};
use super::state::{GameOverCause, GamePhase, GameState, arena_bounds};
use crate::consts::*;

/// Continuous directional key state, sampled once per tick.
/// Diagonals simply combine two axis deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic clock reading for this tick, milliseconds since run start
    pub now_ms: u64,
    /// Pause toggle pressed this tick (an edge, not a hold)
    pub pause: bool,
    /// Directional hold state
    pub dir: Directions,
}

/// Observable effects of one tick, reported to the session for logging and
/// high-score bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    CarrotCollected { score: u32 },
    LevelUp { level: u32 },
    BoostStarted,
    BoostEnded,
    GameOver { cause: GameOverCause },
}

/// Advance the game state by one tick.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<TickEvent> {
    let mut events = Vec::new();

    // A pause toggle flips the flag and ends the tick; everything else
    // (including the unpausing tick itself) is skipped.
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        return events;
    }
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return events,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Boost expiry is checked against the external clock, so a boost that
    // outlives a pause ends on the first simulated tick after it.
    if state.speed.expire_if_due(input.now_ms) {
        events.push(TickEvent::BoostEnded);
    }

    // Player movement: the candidate is accepted or rejected as a whole.
    // (The enemy slides per axis; the player deliberately does not.)
    let speed = state.speed.current();
    let mut candidate = state.player;
    if input.dir.left {
        candidate.x -= speed;
    }
    if input.dir.right {
        candidate.x += speed;
    }
    if input.dir.up {
        candidate.y -= speed;
    }
    if input.dir.down {
        candidate.y += speed;
    }

    let bounds = arena_bounds();
    let in_bounds = candidate.x >= 0
        && candidate.x <= bounds.x - PLAYER_SIZE
        && candidate.y >= 0
        && candidate.y <= bounds.y - PLAYER_SIZE;
    if in_bounds && !any_overlap(&Rect::square(candidate, PLAYER_SIZE), &state.obstacles) {
        state.player = candidate;
    }

    // The settled position is recorded whether or not it changed.
    state.history.record(state.player);

    // The enemy holds still until the pursuit window has filled.
    if let Some(estimate) = state.history.velocity_estimate() {
        let target = state.player + estimate;
        state.enemy = pursue(
            state.enemy,
            ENEMY_SIZE,
            state.enemy_speed,
            target,
            &state.obstacles,
        );
    }

    if let Some(carrot) = state.carrot_rect()
        && state.player_rect().overlaps(&carrot)
    {
        state.score += 1;
        events.push(TickEvent::CarrotCollected { score: state.score });
        state.respawn_carrot();
        roll_bonus_items(state);
        if state.score >= state.next_level_at {
            level_up(state, &mut events);
        }
    }

    if let Some(apple) = state.apple_rect()
        && state.player_rect().overlaps(&apple)
    {
        state.apple = None;
        state.speed.activate(input.now_ms);
        events.push(TickEvent::BoostStarted);
    }

    if let Some(poison) = state.poison_rect()
        && state.player_rect().overlaps(&poison)
    {
        return finish(state, events, GameOverCause::Poisoned);
    }

    if state.player_rect().overlaps(&state.enemy_rect()) {
        return finish(state, events, GameOverCause::Caught);
    }

    events
}

/// On each carrot pickup, each absent bonus item spawns with independent
/// 1-in-`BONUS_SPAWN_ODDS` probability, avoiding the obstacles.
fn roll_bonus_items(state: &mut GameState) {
    if state.apple.is_none() && state.rng.random_range(0..BONUS_SPAWN_ODDS) == 0 {
        state.apple = place_one(&mut state.rng, ITEM_SIZE, &state.obstacles, arena_bounds())
            .map(|r| r.pos);
    }
    if state.poison.is_none() && state.rng.random_range(0..BONUS_SPAWN_ODDS) == 0 {
        state.poison = place_one(&mut state.rng, ITEM_SIZE, &state.obstacles, arena_bounds())
            .map(|r| r.pos);
    }
}

fn level_up(state: &mut GameState, events: &mut Vec<TickEvent>) {
    state.level += 1;
    state.next_level_at += LEVEL_STEP;
    if state.level % 2 == 0 {
        state.enemy_speed += 1;
    }

    let mut exclusions = Vec::with_capacity(state.obstacles.len() + 2);
    exclusions.push(state.player_rect());
    exclusions.push(state.enemy_rect());
    exclusions.extend_from_slice(&state.obstacles);
    let added = place_non_overlapping(
        &mut state.rng,
        OBSTACLES_PER_LEVEL,
        OBSTACLE_SIZE,
        &exclusions,
        arena_bounds(),
        0,
    );
    state.obstacles.extend(added);

    log::info!(
        "level {}: enemy speed {}, {} obstacles",
        state.level,
        state.enemy_speed,
        state.obstacles.len()
    );
    events.push(TickEvent::LevelUp { level: state.level });
}

fn finish(
    state: &mut GameState,
    mut events: Vec<TickEvent>,
    cause: GameOverCause,
) -> Vec<TickEvent> {
    state.phase = GamePhase::GameOver;
    state.outcome = Some(cause);
    events.push(TickEvent::GameOver { cause });
    events
}
