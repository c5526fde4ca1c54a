//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod geometry;
pub mod pursuit;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geometry::{Rect, any_overlap};
pub use pursuit::{PositionHistory, pursue};
pub use spawn::{place_non_overlapping, place_one};
pub use state::{GameOverCause, GamePhase, GameState, SpeedStatus};
pub use tick::{Directions, TickEvent, TickInput, tick};
