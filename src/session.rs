//! Fixed-timestep driver around the simulation
//!
//! Owns the spawn clock and the high-score store so front ends only deal
//! with frame times and input. Both the web loop and the native headless
//! runner go through here.

use std::time::Duration;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScoreStore;
use crate::sim::{GameEvent, GamePhase, GameState, SpawnClock, Spawner, TickInput, tick};
use crate::tuning::Tuning;

/// A running game plus the collaborators the simulation needs
pub struct Session<S: HighScoreStore> {
    pub state: GameState,
    store: S,
    clock: SpawnClock,
    accumulator: f32,
    tick_duration: Duration,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a session with a seeded weighted spawner
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let spawner = Spawner::new(seed, &tuning.kind_weights);
        Self::with_spawner(tuning, spawner, store)
    }

    pub fn with_spawner(tuning: Tuning, spawner: Spawner, store: S) -> Self {
        let high_score = store.load();
        let clock = SpawnClock::from_tuning(&tuning);
        Self {
            state: GameState::with_spawner(tuning, high_score, spawner),
            store,
            clock,
            accumulator: 0.0,
            tick_duration: Duration::from_secs_f32(SIM_DT),
        }
    }

    /// Run as many fixed ticks as `dt` seconds cover.
    ///
    /// Restart/quit requests are one-shot and only apply to the first tick.
    pub fn advance(&mut self, dt: f32, input: &TickInput) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut input = input.clone();
        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.step(&input));
            self.accumulator -= SIM_DT;
            substeps += 1;

            input.restart = false;
            input.quit = false;
        }
        events
    }

    /// Run exactly one tick, feeding due spawns and persisting high scores
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut input = input.clone();
        if self.state.phase == GamePhase::Playing {
            input.spawn_events += self.clock.advance(self.tick_duration);
        }

        let events = tick(&mut self.state, &input);

        for event in &events {
            match event {
                GameEvent::NewHighScore { score } => self.store.save(*score),
                GameEvent::Restarted => self.clock.reset(),
                _ => {}
            }
        }
        events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryHighScore;
    use crate::sim::{FoodItem, FoodKind, Movement};
    use glam::Vec2;

    fn session(high: u64) -> Session<MemoryHighScore> {
        Session::new(Tuning::default(), 1234, MemoryHighScore::new(high))
    }

    fn toxin_on_player(session: &mut Session<MemoryHighScore>) {
        let id = session.state.next_entity_id();
        let x = session.state.player.pos.x;
        session
            .state
            .foods
            .push(FoodItem::new(id, FoodKind::Toxin, Vec2::new(x, 400.0), 100.0));
    }

    #[test]
    fn test_loads_high_score_from_store() {
        let session = session(41);
        assert_eq!(session.high_score(), 41);
    }

    #[test]
    fn test_spawns_once_per_second() {
        let mut session = session(0);
        let input = TickInput::default();
        for _ in 0..59 {
            session.advance(SIM_DT, &input);
        }
        assert!(session.state.foods.is_empty());
        let events = session.advance(SIM_DT, &input);
        assert!(matches!(events[0], GameEvent::FoodSpawned { .. }));
        assert_eq!(session.state.foods.len(), 1);

        for _ in 0..60 {
            session.step(&input);
        }
        assert_eq!(session.state.time_ticks, 120);
        // Both items are still falling
        assert_eq!(session.state.foods.len(), 2);
    }

    #[test]
    fn test_long_frames_are_capped() {
        let mut session = session(0);
        session.advance(5.0, &TickInput::default());
        assert!(session.state.time_ticks <= MAX_SUBSTEPS as u64);
        assert!(session.state.time_ticks >= 5);
    }

    #[test]
    fn test_game_over_persists_high_score() {
        let mut session = session(10);
        session.state.lives = 1;
        session.state.score = 12;
        toxin_on_player(&mut session);

        let events = session.step(&TickInput::default());
        assert!(events.contains(&GameEvent::NewHighScore { score: 12 }));
        assert_eq!(session.store().value, 12);
        assert_eq!(session.store().saves, 1);
    }

    #[test]
    fn test_lower_score_does_not_overwrite() {
        let mut session = session(50);
        session.state.lives = 1;
        session.state.score = 12;
        toxin_on_player(&mut session);

        session.step(&TickInput::default());
        assert!(session.state.is_game_over());
        assert_eq!(session.store().value, 50);
        assert_eq!(session.store().saves, 0);
    }

    #[test]
    fn test_no_spawns_during_game_over_and_restart_resets_clock() {
        let mut session = session(0);
        for _ in 0..30 {
            session.step(&TickInput::default());
        }
        session.state.lives = 1;
        toxin_on_player(&mut session);
        session.step(&TickInput::default());
        assert!(session.state.is_game_over());

        for _ in 0..200 {
            let events = session.step(&TickInput {
                movement: Movement::Left,
                ..Default::default()
            });
            assert!(events.is_empty());
        }

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        session.advance(SIM_DT, &restart);
        assert!(!session.state.is_game_over());
        assert!(session.state.foods.is_empty());

        // A full interval must pass again before the first spawn
        for _ in 0..59 {
            session.step(&TickInput::default());
        }
        assert!(session.state.foods.is_empty());
        session.step(&TickInput::default());
        assert_eq!(session.state.foods.len(), 1);
    }

    #[test]
    fn test_restart_is_one_shot_within_a_frame() {
        let mut session = session(0);
        session.state.lives = 1;
        toxin_on_player(&mut session);
        session.step(&TickInput::default());

        // Plenty of substeps, but only the first sees the restart
        session.accumulator = SIM_DT * 3.0;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let events = session.advance(0.0, &restart);
        let restarts = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Restarted))
            .count();
        assert_eq!(restarts, 1);
    }
}
