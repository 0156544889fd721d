//! Brick Breaker - a classic Breakout game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world state, brick grid, collisions, tick)
//! - `input`: Keyboard to paddle velocity mapping
//! - `controller`: Session lifecycle and frame scheduling
//! - `renderer`: Frame composition and the WebGPU pipeline
//! - `tuning`: Data-driven game balance

pub mod controller;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use controller::{FrameScheduler, GameController, HeadlessOverlay, ManualScheduler, Overlay};
pub use tuning::GameTuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas size used when the host canvas reports no size
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

    /// Ball defaults (pixels, pixels per tick)
    pub const BALL_SIZE: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 2.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the paddle's top edge to the bottom of the canvas
    pub const PADDLE_BOTTOM_MARGIN: f32 = 20.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICKS_PER_ROW: u32 = 9;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_Y: f32 = 60.0;

    /// Ball speeds up by `SPEED_INCREMENT` every `SPEED_UP_EVERY` points
    pub const SPEED_UP_EVERY: u32 = 10;
    pub const SPEED_INCREMENT: f32 = 1.0;

    /// Score at which the HUD switches to the celebration banner
    pub const CELEBRATION_SCORE: u32 = 25;
    pub const CELEBRATION_TEXT: &str = "ІПЗ найкращі!!!";
}

/// Playfield dimensions in canvas pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Canvas size read from the host, falling back to the default size when unset
    pub fn from_canvas(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            Self::default()
        } else {
            Self::new(width as f32, height as f32)
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(consts::DEFAULT_CANVAS_WIDTH, consts::DEFAULT_CANVAS_HEIGHT)
    }
}
