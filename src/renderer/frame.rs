//! Backend-neutral description of one rendered frame
//!
//! Composition is pure so it can be checked without a GPU; the pipeline and the
//! HUD only consume what is produced here.

use glam::Vec2;

use super::vertex::colors;
use crate::Arena;
use crate::sim::{GameState, Rect};
use crate::tuning::GameTuning;

/// Score text, right-aligned at `anchor`
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreLabel {
    pub text: String,
    pub anchor: Vec2,
}

/// A filled primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Rect {
        rect: Rect,
        color: [f32; 4],
    },
}

/// Everything drawn in one tick, in paint order
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Area cleared before painting
    pub arena: Arena,
    pub score: ScoreLabel,
    pub shapes: Vec<Shape>,
}

/// Score line shown in the top-right corner
pub fn score_text(score: u32, tuning: &GameTuning) -> String {
    if score >= tuning.celebration_score {
        tuning.celebration_text.clone()
    } else {
        format!("Score: {}", score)
    }
}

/// Compose the frame for the current state: ball, paddle, then visible bricks
pub fn compose(state: &GameState, tuning: &GameTuning) -> Frame {
    let mut shapes = Vec::with_capacity(2 + state.bricks.len());

    shapes.push(Shape::Circle {
        center: state.ball.pos,
        radius: state.ball.size,
        color: colors::BALL,
    });
    shapes.push(Shape::Rect {
        rect: state.paddle.rect(),
        color: colors::PADDLE,
    });
    // Destroyed bricks draw nothing
    shapes.extend(state.bricks.iter().filter(|b| b.visible).map(|b| Shape::Rect {
        rect: b.rect(),
        color: colors::BRICK,
    }));

    Frame {
        arena: state.arena,
        score: ScoreLabel {
            text: score_text(state.score, tuning),
            anchor: Vec2::new(state.arena.width - 10.0, 30.0),
        },
        shapes,
    }
}
