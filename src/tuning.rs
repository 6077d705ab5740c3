//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so it can be passed
//! into the entities explicitly. Defaults mirror `consts`; an optional JSON
//! override is read from platform storage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::keys;
use crate::platform::storage;

/// Relative spawn weights for each food kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindWeights {
    pub shrimp: u32,
    pub fish: u32,
    pub toxin: u32,
}

impl Default for KindWeights {
    /// Uniform choice over the three kinds
    fn default() -> Self {
        Self {
            shrimp: 1,
            fish: 1,
            toxin: 1,
        }
    }
}

impl KindWeights {
    pub fn total(&self) -> u64 {
        self.shrimp as u64 + self.fish as u64 + self.toxin as u64
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_size: f32,
    /// Distance from the bottom edge to the player's centre
    pub player_y_offset: f32,
    pub player_step: f32,
    /// Ticks per eating-animation frame
    pub animation_speed: u32,

    // === Food ===
    pub food_size: f32,
    pub spawn_margin: f32,
    pub spawn_y: f32,
    pub spawn_interval_ms: u32,
    pub kind_weights: KindWeights,

    // === Difficulty ===
    pub initial_fall_speed: f32,
    pub fall_speed_increment: f32,
    pub points_per_speedup: u64,
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_size: PLAYER_SIZE,
            player_y_offset: PLAYER_Y_OFFSET,
            player_step: PLAYER_STEP,
            animation_speed: ANIMATION_SPEED,

            food_size: FOOD_SIZE,
            spawn_margin: SPAWN_MARGIN,
            spawn_y: SPAWN_Y,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            kind_weights: KindWeights::default(),

            initial_fall_speed: INITIAL_FALL_SPEED,
            fall_speed_increment: FALL_SPEED_INCREMENT,
            points_per_speedup: POINTS_PER_SPEEDUP,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Tuning {
    /// Player's fixed vertical centre
    pub fn player_y(&self) -> f32 {
        self.screen_height - self.player_y_offset
    }

    /// Check that the numbers describe a playable game
    pub fn validate(&self) -> Result<(), String> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(format!(
                "playfield must be positive, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if self.player_size <= 0.0 || self.player_size > self.screen_width {
            return Err(format!(
                "player size {} does not fit a {} wide playfield",
                self.player_size, self.screen_width
            ));
        }
        if self.food_size <= 0.0 {
            return Err(format!("food size must be positive, got {}", self.food_size));
        }
        if self.spawn_margin < 0.0 || self.spawn_margin * 2.0 > self.screen_width {
            return Err(format!(
                "spawn margin {} leaves no room in a {} wide playfield",
                self.spawn_margin, self.screen_width
            ));
        }
        if self.initial_fall_speed <= 0.0 || self.fall_speed_increment <= 0.0 {
            return Err("fall speed and its increment must be positive".to_string());
        }
        if self.points_per_speedup == 0 {
            return Err("points_per_speedup must be at least 1".to_string());
        }
        if self.starting_lives == 0 {
            return Err("starting_lives must be at least 1".to_string());
        }
        if self.spawn_interval_ms == 0 {
            return Err("spawn_interval_ms must be at least 1".to_string());
        }
        if self.animation_speed == 0 {
            return Err("animation_speed must be at least 1".to_string());
        }
        if self.kind_weights.total() == 0 {
            return Err("at least one food kind needs a non-zero weight".to_string());
        }
        Ok(())
    }

    /// Parse and validate a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let tuning: Tuning = serde_json::from_str(json).map_err(|e| e.to_string())?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load the tuning override from platform storage, falling back to defaults
    pub fn load() -> Self {
        match storage::read(keys::TUNING) {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning override: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
