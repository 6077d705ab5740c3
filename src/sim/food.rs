//! Falling food items

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

/// Food kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FoodKind {
    Shrimp,
    #[default]
    Fish,
    /// Harmful: costs a life when caught
    Toxin,
}

impl FoodKind {
    pub const ALL: [FoodKind; 3] = [FoodKind::Shrimp, FoodKind::Fish, FoodKind::Toxin];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodKind::Shrimp => "shrimp",
            FoodKind::Fish => "fish",
            FoodKind::Toxin => "toxin",
        }
    }

    /// Parse a kind name. Unknown names become the default beneficial kind.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "shrimp" => FoodKind::Shrimp,
            "fish" => FoodKind::Fish,
            "toxin" => FoodKind::Toxin,
            other => {
                log::debug!("Unknown food kind {:?}, using fish", other);
                FoodKind::default()
            }
        }
    }

    pub fn is_harmful(&self) -> bool {
        *self == FoodKind::Toxin
    }
}

/// A falling food item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u32,
    pub kind: FoodKind,
    /// Centre position
    pub pos: Vec2,
    pub size: f32,
}

impl FoodItem {
    pub fn new(id: u32, kind: FoodKind, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
        }
    }

    /// Create an item above the playfield at a random whole-pixel column
    /// within the spawn margins
    pub fn spawn<R: Rng + ?Sized>(id: u32, kind: FoodKind, tuning: &Tuning, rng: &mut R) -> Self {
        let min_x = tuning.spawn_margin.round() as i32;
        let max_x = ((tuning.screen_width - tuning.spawn_margin).round() as i32).max(min_x);
        let x = rng.random_range(min_x..=max_x) as f32;
        Self::new(id, kind, Vec2::new(x, tuning.spawn_y), tuning.food_size)
    }

    /// Move down by `speed` pixels
    pub fn fall(&mut self, speed: f32) {
        self.pos.y += speed;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size))
    }
}
