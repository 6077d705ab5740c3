//! Food spawning
//!
//! Timing and choice are separate: `SpawnClock` turns elapsed game time into
//! a count of due spawns, and `Spawner` turns each due spawn into a food item
//! using an injected `KindChooser`.

use std::fmt;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_pcg::Pcg32;

use super::food::{FoodItem, FoodKind};
use crate::tuning::{KindWeights, Tuning};

/// Picks the kind of the next food item
pub trait KindChooser: fmt::Debug {
    fn choose(&mut self, rng: &mut Pcg32) -> FoodKind;
}

/// Weighted random choice over the food kinds
#[derive(Debug, Clone)]
pub struct WeightedKinds {
    /// `None` means uniform
    index: Option<WeightedIndex<u32>>,
}

impl WeightedKinds {
    /// Build from per-kind weights. All-zero weights fall back to uniform.
    pub fn new(weights: &KindWeights) -> Self {
        let index = match WeightedIndex::new([weights.shrimp, weights.fish, weights.toxin]) {
            Ok(index) => Some(index),
            Err(e) => {
                log::warn!("Invalid kind weights {:?} ({}), using uniform", weights, e);
                None
            }
        };
        Self { index }
    }
}

impl Default for WeightedKinds {
    fn default() -> Self {
        Self::new(&KindWeights::default())
    }
}

impl KindChooser for WeightedKinds {
    fn choose(&mut self, rng: &mut Pcg32) -> FoodKind {
        let i = match &self.index {
            Some(index) => index.sample(rng),
            None => rng.random_range(0..FoodKind::ALL.len()),
        };
        FoodKind::ALL[i]
    }
}

/// Repeats a fixed sequence of kinds (scripted runs and tests)
#[derive(Debug, Clone)]
pub struct CycleKinds {
    kinds: Vec<FoodKind>,
    next: usize,
}

impl CycleKinds {
    pub fn new(kinds: Vec<FoodKind>) -> Self {
        Self { kinds, next: 0 }
    }
}

impl KindChooser for CycleKinds {
    fn choose(&mut self, _rng: &mut Pcg32) -> FoodKind {
        if self.kinds.is_empty() {
            return FoodKind::default();
        }
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next += 1;
        kind
    }
}

/// Creates food items from a seeded RNG and a kind chooser
pub struct Spawner {
    rng: Pcg32,
    chooser: Box<dyn KindChooser>,
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner")
            .field("chooser", &self.chooser)
            .finish_non_exhaustive()
    }
}

impl Spawner {
    /// Weighted spawner seeded for reproducible runs
    pub fn new(seed: u64, weights: &KindWeights) -> Self {
        Self::with_chooser(seed, Box::new(WeightedKinds::new(weights)))
    }

    pub fn with_chooser(seed: u64, chooser: Box<dyn KindChooser>) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            chooser,
        }
    }

    /// Create the next food item
    pub fn spawn(&mut self, id: u32, tuning: &Tuning) -> FoodItem {
        let kind = self.chooser.choose(&mut self.rng);
        FoodItem::spawn(id, kind, tuning, &mut self.rng)
    }
}

/// Periodic spawn timer driven by game time
#[derive(Debug, Clone)]
pub struct SpawnClock {
    interval: Duration,
    elapsed: Duration,
}

impl SpawnClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1) as u64),
            elapsed: Duration::ZERO,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.spawn_interval_ms)
    }

    /// Add elapsed time and return how many spawns fell due
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
