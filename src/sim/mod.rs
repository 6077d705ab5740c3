//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod food;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, classify, resolve_catch};
pub use food::{FoodItem, FoodKind};
pub use player::{Animation, Player};
pub use spawner::{CycleKinds, KindChooser, SpawnClock, Spawner, WeightedKinds};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Movement, TickInput, autopilot, tick};
