//! Collision detection and resolution
//!
//! Everything in the playfield is an axis-aligned box. Each tick a food item
//! is either caught by the player, lost past the bottom edge, or still
//! falling; catching is checked first.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::food::FoodItem;
use super::state::{GameEvent, GamePhase, GameState};

/// Axis-aligned bounding box (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True if the interiors intersect. Boxes that only share an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// What happened to a food item this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Overlapping the player
    Caught,
    /// Centre has passed the bottom edge without touching the player
    OffScreen,
    /// Still falling
    Clear,
}

/// Classify a food item against the player box and the bottom edge
pub fn classify(food: &FoodItem, player: &Aabb, floor: f32) -> Contact {
    if food.bounds().overlaps(player) {
        Contact::Caught
    } else if food.pos.y > floor {
        Contact::OffScreen
    } else {
        Contact::Clear
    }
}

/// Apply the game rules for a caught item
///
/// Toxins cost one life and may end the run; anything else scores a point
/// and starts the eating animation. The caller removes the item.
pub fn resolve_catch(state: &mut GameState, food: &FoodItem, events: &mut Vec<GameEvent>) {
    if food.kind.is_harmful() {
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::ToxinHit {
            id: food.id,
            lives: state.lives,
        });
        log::debug!("Toxin {} hit, {} lives left", food.id, state.lives);

        if state.lives == 0 {
            end_run(state, events);
        }
    } else {
        state.score += 1;
        state.player.trigger_eat_animation();
        events.push(GameEvent::FoodEaten {
            id: food.id,
            kind: food.kind,
            score: state.score,
        });
    }
}

/// Transition to game over and record a new high score if one was set
fn end_run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    events.push(GameEvent::GameOver { score: state.score });
    log::info!("Game over with score {}", state.score);

    if state.score > state.high_score {
        state.high_score = state.score;
        events.push(GameEvent::NewHighScore { score: state.score });
        log::info!("New high score: {}", state.score);
    }
}
