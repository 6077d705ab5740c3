//! High score persistence
//!
//! The only durable game state: a single non-negative integer stored as
//! text. Missing or corrupt values read as 0.

use crate::keys;
use crate::platform::storage;

/// Where the high score lives between sessions
pub trait HighScoreStore {
    /// Stored high score, or 0 if absent/corrupt
    fn load(&self) -> u64;
    fn save(&mut self, score: u64);
}

/// Parse a stored value. Anything that is not a non-negative integer is 0.
pub fn parse_high_score(text: &str) -> u64 {
    match text.trim().parse::<u64>() {
        Ok(score) => score,
        Err(e) => {
            log::warn!("Corrupt high score {:?} ({}), starting from 0", text, e);
            0
        }
    }
}

/// High score kept in platform storage (LocalStorage on web, a file natively)
#[derive(Debug, Clone)]
pub struct StoredHighScore {
    key: String,
}

impl Default for StoredHighScore {
    fn default() -> Self {
        Self::new(keys::HIGH_SCORE)
    }
}

impl StoredHighScore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

impl HighScoreStore for StoredHighScore {
    fn load(&self) -> u64 {
        match storage::read(&self.key) {
            Some(text) => {
                let score = parse_high_score(&text);
                log::info!("Loaded high score {}", score);
                score
            }
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        if storage::write(&self.key, &score.to_string()) {
            log::info!("High score saved ({})", score);
        }
    }
}

/// In-memory store (tests and headless runs that should not touch disk)
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    pub value: u64,
    /// Number of saves performed
    pub saves: u32,
}

impl MemoryHighScore {
    pub fn new(value: u64) -> Self {
        Self { value, saves: 0 }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u64 {
        self.value
    }

    fn save(&mut self, score: u64) {
        self.value = score;
        self.saves += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score("42"), 42);
        assert_eq!(parse_high_score(" 7\n"), 7);
        assert_eq!(parse_high_score(""), 0);
        assert_eq!(parse_high_score("-3"), 0);
        assert_eq!(parse_high_score("lots"), 0);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScore::new(5);
        assert_eq!(store.load(), 5);
        store.save(9);
        assert_eq!(store.load(), 9);
        assert_eq!(store.saves, 1);
    }
}
