//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per animation frame, velocities in pixels per tick
//! - Randomness only through a caller-supplied RNG
//! - Stable iteration order (row by row, left to right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{Rect, WallContact, hits_brick, hits_paddle, is_lost, wall_contact};
pub use grid::{BrickLayout, build_grid};
pub use state::{Ball, Brick, BrickGrid, GameEvent, GamePhase, GameState, Paddle};
pub use tick::tick;
