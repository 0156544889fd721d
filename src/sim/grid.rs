//! Brick grid construction
//!
//! The grid is staggered: every row holds one brick fewer than the row above it,
//! and each row is centered horizontally on the canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Brick, BrickGrid};
use crate::consts::*;

/// Geometry of the brick grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    /// Number of rows
    pub rows: u32,
    /// Bricks in the top row; row `i` holds `base_per_row - i`
    pub base_per_row: u32,
    pub width: f32,
    pub height: f32,
    /// Gap between neighbouring bricks, horizontally and vertically
    pub padding: f32,
    /// Top edge of the first row
    pub offset_y: f32,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            base_per_row: BRICKS_PER_ROW,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_y: BRICK_OFFSET_Y,
        }
    }
}

impl BrickLayout {
    /// Number of bricks in a row (0 once the row would run out)
    pub fn bricks_in_row(&self, row: u32) -> u32 {
        self.base_per_row.saturating_sub(row)
    }

    /// Total number of bricks in the grid
    pub fn brick_count(&self) -> u32 {
        (0..self.rows).map(|row| self.bricks_in_row(row)).sum()
    }

    /// Horizontal distance between the left edges of neighbouring bricks
    #[inline]
    pub fn stride_x(&self) -> f32 {
        self.width + self.padding
    }

    #[inline]
    pub fn stride_y(&self) -> f32 {
        self.height + self.padding
    }
}

/// Build a fresh grid with every brick visible
pub fn build_grid(layout: &BrickLayout, canvas_width: f32) -> BrickGrid {
    let center_x = canvas_width / 2.0;

    let rows = (0..layout.rows)
        .map(|row| {
            let count = layout.bricks_in_row(row);
            let total_width = count as f32 * layout.stride_x();
            let start_x = center_x - total_width / 2.0;
            let y = layout.offset_y + row as f32 * layout.stride_y();

            (0..count)
                .map(|col| {
                    let x = start_x + col as f32 * layout.stride_x();
                    Brick::new(Vec2::new(x, y), layout.width, layout.height)
                })
                .collect()
        })
        .collect();

    BrickGrid::from_rows(rows)
}
