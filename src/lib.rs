//! SnackLotl - An underwater axolotl food-catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `session`: Fixed-timestep driver around the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::{HighScoreStore, MemoryHighScore, StoredHighScore};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 160.0;
    /// Distance from the bottom edge to the player's centre
    pub const PLAYER_Y_OFFSET: f32 = 80.0;
    /// Pixels moved per tick while a direction is held
    pub const PLAYER_STEP: f32 = 10.0;
    /// Ticks spent on each frame of the eating animation
    pub const ANIMATION_SPEED: u32 = 10;
    /// Frames in the player sprite sheet (frame 0 is idle)
    pub const ANIMATION_FRAMES: u8 = 4;

    /// Food defaults
    pub const FOOD_SIZE: f32 = 100.0;
    /// Horizontal spawn margin from either edge
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Spawn height (above the visible playfield)
    pub const SPAWN_Y: f32 = -50.0;
    pub const SPAWN_INTERVAL_MS: u32 = 1000;

    /// Difficulty
    pub const INITIAL_FALL_SPEED: f32 = 5.0;
    pub const FALL_SPEED_INCREMENT: f32 = 0.5;
    pub const POINTS_PER_SPEEDUP: u64 = 10;

    pub const STARTING_LIVES: u8 = 3;
}

/// Storage keys shared by the web (LocalStorage) and native (file) backends
pub mod keys {
    pub const HIGH_SCORE: &str = "snacklotl_highscore";
    pub const SETTINGS: &str = "snacklotl_settings";
    pub const TUNING: &str = "snacklotl_tuning";
}
