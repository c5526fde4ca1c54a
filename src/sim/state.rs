//! Game state and core simulation types
//!
//! Everything that belongs to a single run lives here and is created fresh
//! by [`GameState::new`]. Only the high score and the difficulty preference
//! outlive a run, and both are owned by the session, not the sim.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geometry::Rect;
use super::pursuit::PositionHistory;
use super::spawn::{place_non_overlapping, place_one};
use crate::consts::*;
use crate::settings::Difficulty;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation suspended; only the unpause toggle is processed
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// The enemy reached the player
    Caught,
    /// The player picked up the poison item
    Poisoned,
}

/// Player movement speed, normal or temporarily boosted by an apple.
///
/// A single expiry is tracked: picking up an apple while boosted simply
/// pushes the expiry out again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedStatus {
    boost_until_ms: Option<u64>,
}

impl SpeedStatus {
    /// Pixels per tick at the current status.
    pub fn current(&self) -> i32 {
        if self.boost_until_ms.is_some() {
            BOOST_SPEED
        } else {
            PLAYER_SPEED
        }
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_until_ms.is_some()
    }

    /// Start (or extend) the boost from `now_ms`.
    pub fn activate(&mut self, now_ms: u64) {
        self.boost_until_ms = Some(now_ms + BOOST_DURATION_MS);
    }

    /// Clear the boost once `now_ms` has reached the expiry.
    /// Returns true if the boost was cleared on this call.
    pub fn expire_if_due(&mut self, now_ms: u64) -> bool {
        match self.boost_until_ms {
            Some(expiry) if now_ms >= expiry => {
                self.boost_until_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// Arena bounds as a vector (width, height).
pub fn arena_bounds() -> IVec2 {
    IVec2::new(ARENA_WIDTH, ARENA_HEIGHT)
}

/// Complete per-run game state (deterministic for a given seed + inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Set exactly once, when `phase` becomes `GameOver`
    pub outcome: Option<GameOverCause>,
    /// Player top-left corner
    pub player: IVec2,
    /// Enemy top-left corner
    pub enemy: IVec2,
    /// Enemy step size per tick; rises with level
    pub enemy_speed: i32,
    pub speed: SpeedStatus,
    pub history: PositionHistory,
    /// Static obstacles; only ever appended to
    pub obstacles: Vec<Rect>,
    pub carrot: Option<IVec2>,
    pub apple: Option<IVec2>,
    pub poison: Option<IVec2>,
    pub score: u32,
    /// Starts at 1
    pub level: u32,
    /// Score at which the next level-up fires
    pub next_level_at: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh run: player and enemy at their home positions, the
    /// difficulty's obstacle count placed around them, and a carrot on the
    /// board.
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let player = IVec2::new(ARENA_WIDTH / 4, ARENA_HEIGHT / 2);
        let enemy = IVec2::new(3 * ARENA_WIDTH / 4, ARENA_HEIGHT / 2);
        let reserved = [
            Rect::square(player, PLAYER_SIZE),
            Rect::square(enemy, ENEMY_SIZE),
        ];

        let obstacles = place_non_overlapping(
            &mut rng,
            difficulty.obstacle_count(),
            OBSTACLE_SIZE,
            &reserved,
            arena_bounds(),
            0,
        );
        let carrot = place_one(&mut rng, ITEM_SIZE, &obstacles, arena_bounds()).map(|r| r.pos);

        log::info!(
            "new run: seed={} difficulty={} obstacles={}",
            seed,
            difficulty.as_str(),
            obstacles.len()
        );

        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            outcome: None,
            player,
            enemy,
            enemy_speed: difficulty.enemy_speed(),
            speed: SpeedStatus::default(),
            history: PositionHistory::new(),
            obstacles,
            carrot,
            apple: None,
            poison: None,
            score: 0,
            level: 1,
            next_level_at: LEVEL_STEP,
            time_ticks: 0,
        }
    }

    pub fn player_rect(&self) -> Rect {
        Rect::square(self.player, PLAYER_SIZE)
    }

    pub fn enemy_rect(&self) -> Rect {
        Rect::square(self.enemy, ENEMY_SIZE)
    }

    pub fn carrot_rect(&self) -> Option<Rect> {
        self.carrot.map(|p| Rect::square(p, ITEM_SIZE))
    }

    pub fn apple_rect(&self) -> Option<Rect> {
        self.apple.map(|p| Rect::square(p, ITEM_SIZE))
    }

    pub fn poison_rect(&self) -> Option<Rect> {
        self.poison.map(|p| Rect::square(p, ITEM_SIZE))
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Drop a fresh carrot avoiding the obstacles. Stays absent if the
    /// placement budget runs out (a board that full is effectively over).
    pub(crate) fn respawn_carrot(&mut self) {
        self.carrot =
            place_one(&mut self.rng, ITEM_SIZE, &self.obstacles, arena_bounds()).map(|r| r.pos);
    }
}
