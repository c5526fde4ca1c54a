//! Lagged-pursuit enemy AI
//!
//! The enemy chases a prediction of where the player is heading, not the
//! player's raw position: a bounded window of trailing positions yields an
//! average per-tick displacement, and the chase target is the player offset
//! by that displacement. The window keeps the predictor robust to jitter and
//! bounded in memory.

use std::collections::VecDeque;

use glam::IVec2;

use super::geometry::{Rect, any_overlap};
use crate::consts::PURSUIT_WINDOW;

/// Bounded FIFO of the player's most recent positions.
#[derive(Debug, Clone, Default)]
pub struct PositionHistory {
    window: VecDeque<IVec2>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(PURSUIT_WINDOW),
        }
    }

    /// Append a position, dropping the oldest once the window is full.
    pub fn record(&mut self, pos: IVec2) {
        self.window.push_back(pos);
        if self.window.len() > PURSUIT_WINDOW {
            self.window.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.window.len() == PURSUIT_WINDOW
    }

    /// Average displacement per tick over the trailing window, or `None`
    /// until the window has filled (the enemy's warm-up period).
    pub fn velocity_estimate(&self) -> Option<IVec2> {
        if !self.is_full() {
            return None;
        }
        let oldest = *self.window.front()?;
        let newest = *self.window.back()?;
        Some((newest - oldest) / PURSUIT_WINDOW as i32)
    }
}

/// Advance the enemy one step toward `target`.
///
/// Each axis moves `±speed` independently (`0` when the coordinates already
/// match) and is reverted if the move would push the enemy's rect into an
/// obstacle. Because the axes are evaluated independently the enemy slides
/// along obstacle edges instead of stalling against them.
pub fn pursue(enemy: IVec2, size: i32, speed: i32, target: IVec2, obstacles: &[Rect]) -> IVec2 {
    let step = |cur: i32, goal: i32| -> i32 {
        if cur < goal {
            speed
        } else if cur > goal {
            -speed
        } else {
            0
        }
    };

    let mut pos = enemy;

    let nx = pos.x + step(pos.x, target.x);
    if !any_overlap(&Rect::square(IVec2::new(nx, pos.y), size), obstacles) {
        pos.x = nx;
    }

    let ny = pos.y + step(pos.y, target.y);
    if !any_overlap(&Rect::square(IVec2::new(pos.x, ny), size), obstacles) {
        pos.y = ny;
    }

    pos
}
