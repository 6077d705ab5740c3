//! The player-controlled axolotl

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::ANIMATION_FRAMES;
use crate::tuning::Tuning;

/// Eating animation state machine
///
/// `Idle` always shows frame 0. A catch enters `Eating` at frame 1; each
/// frame is held for `speed` ticks and the sequence ends back in `Idle`
/// after the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Animation {
    #[default]
    Idle,
    Eating { frame: u8, counter: u32 },
}

impl Animation {
    /// Start (or restart) the eating sequence
    pub fn start() -> Self {
        Animation::Eating {
            frame: 1,
            counter: 0,
        }
    }

    /// Advance by one tick
    pub fn advance(self, speed: u32) -> Self {
        match self {
            Animation::Idle => Animation::Idle,
            Animation::Eating { frame, counter } => {
                let counter = counter + 1;
                if counter < speed {
                    return Animation::Eating { frame, counter };
                }
                let frame = frame + 1;
                if frame >= ANIMATION_FRAMES {
                    Animation::Idle
                } else {
                    Animation::Eating { frame, counter: 0 }
                }
            }
        }
    }

    /// Sprite frame to display (0 = idle)
    pub fn frame(&self) -> u8 {
        match self {
            Animation::Idle => 0,
            Animation::Eating { frame, .. } => *frame,
        }
    }

    pub fn is_eating(&self) -> bool {
        matches!(self, Animation::Eating { .. })
    }
}

/// The player's character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Centre position; `y` never changes
    pub pos: Vec2,
    pub size: f32,
    pub animation: Animation,
    min_x: f32,
    max_x: f32,
    animation_speed: u32,
}

impl Player {
    /// Create a player centred horizontally at the bottom of the playfield
    pub fn new(tuning: &Tuning) -> Self {
        let half = tuning.player_size / 2.0;
        let max_x = (tuning.screen_width - half).max(half);
        Self {
            pos: Vec2::new(tuning.screen_width / 2.0, tuning.player_y()),
            size: tuning.player_size,
            animation: Animation::Idle,
            min_x: half,
            max_x,
            animation_speed: tuning.animation_speed,
        }
    }

    /// Shift horizontally by `delta`, staying inside the playfield
    pub fn move_by(&mut self, delta: f32) {
        self.pos.x = (self.pos.x + delta).clamp(self.min_x, self.max_x);
    }

    /// Allowed range for the centre
    pub fn x_range(&self) -> (f32, f32) {
        (self.min_x, self.max_x)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size))
    }

    /// Advance the animation by one tick
    pub fn tick(&mut self) {
        self.animation = self.animation.advance(self.animation_speed);
    }

    pub fn trigger_eat_animation(&mut self) {
        self.animation = Animation::start();
    }

    pub fn frame(&self) -> u8 {
        self.animation.frame()
    }
}
