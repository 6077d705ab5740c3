//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::food::{FoodItem, FoodKind};
use super::player::Player;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; waiting for restart or quit
    GameOver,
}

/// Things that happened during a tick, for audio/HUD/persistence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodSpawned { id: u32, kind: FoodKind },
    FoodEaten { id: u32, kind: FoodKind, score: u64 },
    ToxinHit { id: u32, lives: u8 },
    /// Fell past the bottom edge uncaught
    FoodMissed { id: u32, kind: FoodKind },
    SpeedUp { speed: f32 },
    GameOver { score: u64 },
    /// The store should persist this value
    NewHighScore { score: u64 },
    Restarted,
    QuitRequested,
}

/// Complete game state for one session
#[derive(Debug)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Best score across sessions; never decreases
    pub high_score: u64,
    /// Fall speed shared by every food item (pixels per tick)
    pub fall_speed: f32,
    /// `score / points_per_speedup` at the last speed increase
    pub speed_level: u64,
    pub player: Player,
    /// Active food items in spawn order
    pub foods: Vec<FoodItem>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub spawner: Spawner,
    next_id: u32,
}

impl GameState {
    /// New session with a default-seeded weighted spawner
    pub fn new(tuning: Tuning, high_score: u64) -> Self {
        let spawner = Spawner::new(0, &tuning.kind_weights);
        Self::with_spawner(tuning, high_score, spawner)
    }

    pub fn with_spawner(tuning: Tuning, high_score: u64, spawner: Spawner) -> Self {
        Self {
            phase: GamePhase::Playing,
            score: 0,
            lives: tuning.starting_lives,
            high_score,
            fall_speed: tuning.initial_fall_speed,
            speed_level: 0,
            player: Player::new(&tuning),
            foods: Vec::new(),
            time_ticks: 0,
            spawner,
            next_id: 1,
            tuning,
        }
    }

    /// Reset for a new run. Only the high score and the spawner's RNG stream
    /// carry over.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.fall_speed = self.tuning.initial_fall_speed;
        self.speed_level = 0;
        self.player = Player::new(&self.tuning);
        self.foods.clear();
        self.time_ticks = 0;
        self.next_id = 1;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append one food item from the spawner
    pub fn spawn_food(&mut self) -> &FoodItem {
        let id = self.next_entity_id();
        let food = self.spawner.spawn(id, &self.tuning);
        log::debug!("Spawned {} {} at x={}", food.kind.as_str(), id, food.pos.x);
        self.foods.push(food);
        &self.foods[self.foods.len() - 1]
    }

    /// Raise the fall speed once per speed level the score has reached.
    /// Returns the new speed if it changed.
    pub fn update_difficulty(&mut self) -> Option<f32> {
        let level = self.score / self.tuning.points_per_speedup.max(1);
        if level <= self.speed_level {
            return None;
        }
        let steps = (level - self.speed_level) as f32;
        self.fall_speed += self.tuning.fall_speed_increment * steps;
        self.speed_level = level;
        log::debug!("Speed level {} -> fall speed {}", level, self.fall_speed);
        Some(self.fall_speed)
    }
}
