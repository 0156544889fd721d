//! Collision tests between the ball and axis-aligned rectangles
//!
//! The ball is treated as its bounding square. A hit requires the ball's horizontal
//! span to lie strictly inside the target's span; a ball that only overlaps an edge
//! passes by.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Ball;
use crate::Arena;

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            w,
            h,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.h
    }
}

/// Walls the ball is touching after a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Left or right edge
    pub side: bool,
    /// Top edge
    pub ceiling: bool,
}

/// Check which canvas edges the ball has crossed
pub fn wall_contact(ball: &Ball, arena: &Arena) -> WallContact {
    WallContact {
        side: ball.right() > arena.width || ball.left() < 0.0,
        ceiling: ball.top() < 0.0,
    }
}

/// Ball's horizontal span lies strictly inside the rectangle's span
#[inline]
pub fn within_span(ball: &Ball, rect: &Rect) -> bool {
    ball.left() > rect.left() && ball.right() < rect.right()
}

/// Paddle test: only checks that the ball's bottom has passed the paddle's top edge,
/// with no lower bound
pub fn hits_paddle(ball: &Ball, paddle: &Rect) -> bool {
    within_span(ball, paddle) && ball.bottom() > paddle.top()
}

/// Brick test: horizontal containment plus vertical overlap
pub fn hits_brick(ball: &Ball, brick: &Rect) -> bool {
    within_span(ball, brick) && ball.bottom() > brick.top() && ball.top() < brick.bottom()
}

/// Ball has dropped past the bottom edge
pub fn is_lost(ball: &Ball, arena: &Arena) -> bool {
    ball.bottom() > arena.height
}
