//! Game balance and layout tuning
//!
//! Every field has a default, so a partial JSON document only overrides what it names.
//! On the web the document is read from LocalStorage; it is never written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BrickLayout;

/// When a cleared (or partially cleared) grid comes back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RefillPolicy {
    /// Refill once every brick has been destroyed
    #[default]
    WhenCleared,
    /// Refill whenever the score is a multiple of `points`, cleared or not
    EveryPoints { points: u32 },
}

impl RefillPolicy {
    /// Legacy rule: score compared against rows × base bricks per row (45),
    /// which is not the number of bricks in the staggered grid (35)
    pub fn legacy(layout: &BrickLayout) -> Self {
        RefillPolicy::EveryPoints {
            points: layout.rows * layout.base_per_row,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Radius in pixels
    pub size: f32,
    /// Speed at the start of every session (pixels per tick, per axis)
    pub start_speed: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            size: BALL_SIZE,
            start_speed: BALL_START_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleTuning {
    pub width: f32,
    pub height: f32,
    /// Velocity applied while an arrow key is held (pixels per tick)
    pub speed: f32,
    pub bottom_margin: f32,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            bottom_margin: PADDLE_BOTTOM_MARGIN,
        }
    }
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub ball: BallTuning,
    pub paddle: PaddleTuning,
    pub bricks: BrickLayout,
    /// Points between speed-ups (0 disables them)
    pub speed_up_every: u32,
    pub speed_increment: f32,
    pub refill: RefillPolicy,
    /// Score from which the HUD shows `celebration_text` instead of the score
    pub celebration_score: u32,
    pub celebration_text: String,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            ball: BallTuning::default(),
            paddle: PaddleTuning::default(),
            bricks: BrickLayout::default(),
            speed_up_every: SPEED_UP_EVERY,
            speed_increment: SPEED_INCREMENT,
            refill: RefillPolicy::default(),
            celebration_score: CELEBRATION_SCORE,
            celebration_text: CELEBRATION_TEXT.to_string(),
        }
    }
}

impl GameTuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "breakout_tuning";

    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring invalid tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Whether the given score triggers a speed-up
    pub fn speeds_up_at(&self, score: u32) -> bool {
        self.speed_up_every > 0 && score.is_multiple_of(self.speed_up_every)
    }
}
