//! Game state and core simulation types

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::grid::build_grid;
use crate::Arena;
use crate::tuning::GameTuning;

/// Whether a session is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start, or after the ball was lost
    #[default]
    Idle,
    /// Ticks are being scheduled
    Running,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the left or right edge
    WallBounce,
    /// Ball bounced off the top edge
    CeilingBounce,
    PaddleBounce,
    BrickDestroyed { row: usize, col: usize },
    /// Ball speed went up
    SpeedUp { speed: f32 },
    /// Every brick was made visible again
    GridRefilled,
    /// Ball dropped past the bottom edge
    BallLost,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per tick. Each axis is set to ±speed independently.
    pub vel: Vec2,
    /// Radius
    pub size: f32,
    pub speed: f32,
}

impl Ball {
    /// Ball at `pos` heading up and to the right
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(speed, -speed),
            size,
            speed,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.size
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Set a new speed, keeping the direction of travel on both axes
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.vel.x = if self.vel.x > 0.0 { speed } else { -speed };
        self.vel.y = if self.vel.y > 0.0 { speed } else { -speed };
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    /// Velocity magnitude while a direction key is held
    pub speed: f32,
    /// Current horizontal velocity
    pub dx: f32,
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            w: self.w,
            h: self.h,
        }
    }

    /// Apply velocity and keep the paddle on the canvas
    pub fn advance(&mut self, arena: &Arena) {
        self.pos.x += self.dx;

        if self.pos.x + self.w > arena.width {
            self.pos.x = arena.width - self.w;
        }
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
    }
}

/// A single brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub visible: bool,
}

impl Brick {
    pub fn new(pos: Vec2, w: f32, h: f32) -> Self {
        Self {
            pos,
            w,
            h,
            visible: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            w: self.w,
            h: self.h,
        }
    }
}

/// Bricks grouped by row, top row first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: Vec<Vec<Brick>>,
}

impl BrickGrid {
    pub fn from_rows(rows: Vec<Vec<Brick>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Brick>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// All bricks in row order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.rows.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.rows.iter_mut().flatten()
    }

    /// Total number of bricks, visible or not
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn visible_count(&self) -> usize {
        self.iter().filter(|b| b.visible).count()
    }

    /// True once every brick has been destroyed
    pub fn is_cleared(&self) -> bool {
        self.iter().all(|b| !b.visible)
    }

    /// Make every brick visible again; geometry is untouched
    pub fn show_all(&mut self) {
        for brick in self.iter_mut() {
            brick.visible = true;
        }
    }
}

/// Complete world state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub score: u32,
}

impl GameState {
    /// State shown before the first start: ball in the middle of the canvas,
    /// paddle centered near the bottom
    pub fn new(arena: Arena, tuning: &GameTuning) -> Self {
        let center = arena.center();
        let paddle = Paddle {
            pos: Vec2::new(
                center.x - tuning.paddle.width / 2.0,
                arena.height - tuning.paddle.bottom_margin,
            ),
            w: tuning.paddle.width,
            h: tuning.paddle.height,
            speed: tuning.paddle.speed,
            dx: 0.0,
        };

        Self {
            arena,
            ball: Ball::new(center, tuning.ball.size, tuning.ball.start_speed),
            paddle,
            bricks: build_grid(&tuning.bricks, arena.width),
            score: 0,
        }
    }

    /// Reset for a new session. The ball starts at mid-height at a random
    /// horizontal position, heading up and randomly left or right.
    pub fn reset<R: Rng>(&mut self, tuning: &GameTuning, rng: &mut R) {
        let arena = self.arena;
        let size = tuning.ball.size;
        let speed = tuning.ball.start_speed;

        self.score = 0;

        self.paddle.pos.x = arena.width / 2.0 - self.paddle.w / 2.0;
        self.paddle.dx = 0.0;

        let x = rng.random::<f32>() * (arena.width - size * 2.0) + size;
        let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        self.ball = Ball {
            pos: Vec2::new(x, arena.height / 2.0),
            vel: Vec2::new(direction * speed, -speed),
            size,
            speed,
        };

        self.bricks = build_grid(&tuning.bricks, arena.width);
    }
}
