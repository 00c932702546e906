//! Marble simulation
//!
//! All gameplay logic lives here. The module is pure and deterministic:
//! - One tick per frame, no wall-clock input
//! - Seeded RNG only
//! - Stable iteration order (paddle first, bricks in declaration order,
//!   marbles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{ball_hits_brick, balls_overlap};
pub use state::{Ball, Brick, BrickKind, Direction, WorldState};
pub use tick::{TickInput, tick};
