//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use serde::{Deserialize, Serialize};

use super::collision::{Contact, classify, resolve_catch};
use super::state::{GameEvent, GamePhase, GameState};

/// Horizontal movement intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    #[default]
    None,
}

impl Movement {
    /// Parse an intent name; anything unrecognised means no movement
    pub fn from_key(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "left" => Movement::Left,
            "right" => Movement::Right,
            _ => Movement::None,
        }
    }

    /// Combine held direction keys. Holding both cancels out.
    pub fn from_held(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Movement::Left,
            (false, true) => Movement::Right,
            _ => Movement::None,
        }
    }

    /// Signed horizontal delta for a given step size
    pub fn dx(&self, step: f32) -> f32 {
        match self {
            Movement::Left => -step,
            Movement::Right => step,
            Movement::None => 0.0,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: Movement,
    /// Spawn timer firings queued since the last tick
    pub spawn_events: u32,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
    /// Leave the game (only honoured after game over)
    pub quit: bool,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
            events.push(GameEvent::Restarted);
            log::info!("Restarted (high score {})", state.high_score);
        } else if input.quit {
            events.push(GameEvent::QuitRequested);
        }
        return events;
    }

    state.time_ticks += 1;

    // Move player
    let movement = if input.autopilot {
        autopilot(state)
    } else {
        input.movement
    };
    state.player.move_by(movement.dx(state.tuning.player_step));

    // Drain queued spawns
    for _ in 0..input.spawn_events {
        let food = state.spawn_food();
        events.push(GameEvent::FoodSpawned {
            id: food.id,
            kind: food.kind,
        });
    }

    // Fall, then collide against the player or the bottom edge
    let speed = state.fall_speed;
    let floor = state.tuning.screen_height;
    let player_box = state.player.bounds();
    let foods = std::mem::take(&mut state.foods);
    let mut kept = Vec::with_capacity(foods.len());

    for mut food in foods {
        // A toxin earlier in this tick may have ended the run
        if state.phase == GamePhase::GameOver {
            kept.push(food);
            continue;
        }

        food.fall(speed);
        match classify(&food, &player_box, floor) {
            Contact::Caught => resolve_catch(state, &food, &mut events),
            Contact::OffScreen => events.push(GameEvent::FoodMissed {
                id: food.id,
                kind: food.kind,
            }),
            Contact::Clear => kept.push(food),
        }
    }
    state.foods = kept;

    state.player.tick();

    if state.phase == GamePhase::Playing {
        if let Some(speed) = state.update_difficulty() {
            events.push(GameEvent::SpeedUp { speed });
        }
    }

    events
}

/// Demo-mode steering: dodge the nearest toxin about to land on the player,
/// otherwise chase the lowest beneficial item still above the player.
pub fn autopilot(state: &GameState) -> Movement {
    let player = &state.player;
    let px = player.pos.x;
    let step = state.tuning.player_step;
    let (min_x, max_x) = player.x_range();
    let reach = (player.size + state.tuning.food_size) / 2.0;
    let bounds = player.bounds();
    // Roughly half a second of fall above the player's head
    let lookahead = bounds.min.y - state.fall_speed * 30.0 - state.tuning.food_size / 2.0;

    let threat = state
        .foods
        .iter()
        .filter(|f| f.kind.is_harmful())
        .filter(|f| f.pos.y >= lookahead && f.pos.y <= bounds.max.y)
        .filter(|f| (f.pos.x - px).abs() < reach + step)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(toxin) = threat {
        let away = if toxin.pos.x >= px {
            Movement::Left
        } else {
            Movement::Right
        };
        // Pinned against a wall: the only way out is past it
        let blocked = match away {
            Movement::Left => px - step < min_x,
            Movement::Right => px + step > max_x,
            Movement::None => false,
        };
        return match (away, blocked) {
            (Movement::Left, true) => Movement::Right,
            (Movement::Right, true) => Movement::Left,
            (dir, _) => dir,
        };
    }

    let target = state
        .foods
        .iter()
        .filter(|f| !f.kind.is_harmful() && f.pos.y < player.pos.y)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match target {
        Some(food) if food.pos.x > px + step / 2.0 => Movement::Right,
        Some(food) if food.pos.x < px - step / 2.0 => Movement::Left,
        _ => Movement::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::food::{FoodItem, FoodKind};
    use crate::sim::spawner::{CycleKinds, Spawner};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Put an item right above the player so the next fall lands on it
    fn drop_on_player(state: &mut GameState, kind: FoodKind) -> u32 {
        let id = state.next_entity_id();
        let x = state.player.pos.x;
        state
            .foods
            .push(FoodItem::new(id, kind, Vec2::new(x, 400.0), 100.0));
        id
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_movement_parsing() {
        assert_eq!(Movement::from_key("left"), Movement::Left);
        assert_eq!(Movement::from_key("RIGHT"), Movement::Right);
        assert_eq!(Movement::from_key("up"), Movement::None);
        assert_eq!(Movement::from_key(""), Movement::None);
        assert_eq!(Movement::from_held(true, true), Movement::None);
        assert_eq!(Movement::Left.dx(10.0), -10.0);
    }

    #[test]
    fn test_movement_input_moves_player() {
        let mut state = GameState::new(Tuning::default(), 0);
        let input = TickInput {
            movement: Movement::Left,
            ..Default::default()
        };
        tick(&mut state, &input);
        tick(&mut state, &input);
        assert_eq!(state.player.pos.x, 380.0);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_spawn_events_append_food() {
        let mut state = GameState::new(Tuning::default(), 0);
        let input = TickInput {
            spawn_events: 2,
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        assert_eq!(state.foods.len(), 2);
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::FoodSpawned { .. }))
            .count();
        assert_eq!(spawned, 2);
        // New items fall on their first tick
        assert!(state.foods.iter().all(|f| f.pos.y == -45.0));
    }

    #[test]
    fn test_spec_scenario_score_and_speed() {
        let mut state = GameState::new(Tuning::default(), 0);
        assert_eq!((state.lives, state.score, state.fall_speed), (3, 0, 5.0));

        drop_on_player(&mut state, FoodKind::Toxin);
        tick(&mut state, &idle());
        assert_eq!((state.lives, state.score), (2, 0));
        assert!(state.foods.is_empty());

        drop_on_player(&mut state, FoodKind::Shrimp);
        tick(&mut state, &idle());
        assert_eq!((state.lives, state.score), (2, 1));

        for _ in 0..8 {
            drop_on_player(&mut state, FoodKind::Fish);
            tick(&mut state, &idle());
        }
        assert_eq!(state.score, 9);
        assert_eq!(state.fall_speed, 5.0);

        drop_on_player(&mut state, FoodKind::Fish);
        let events = tick(&mut state, &idle());
        assert_eq!(state.score, 10);
        assert_eq!(state.fall_speed, 5.5);
        assert!(events.contains(&GameEvent::SpeedUp { speed: 5.5 }));
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_last_life_ends_game_and_records_high_score() {
        let mut state = GameState::new(Tuning::default(), 4);
        state.lives = 1;
        state.score = 9;
        drop_on_player(&mut state, FoodKind::Toxin);

        let events = tick(&mut state, &idle());
        assert_eq!(state.lives, 0);
        assert!(state.is_game_over());
        assert_eq!(state.high_score, 9);
        assert!(events.contains(&GameEvent::NewHighScore { score: 9 }));
    }

    #[test]
    fn test_off_screen_food_is_removed_without_effect() {
        let mut state = GameState::new(Tuning::default(), 0);
        state
            .foods
            .push(FoodItem::new(7, FoodKind::Toxin, Vec2::new(40.0, 598.0), 100.0));
        state
            .foods
            .push(FoodItem::new(8, FoodKind::Fish, Vec2::new(40.0, 300.0), 100.0));

        let events = tick(&mut state, &idle());
        assert_eq!(
            events,
            vec![GameEvent::FoodMissed {
                id: 7,
                kind: FoodKind::Toxin
            }]
        );
        assert_eq!((state.lives, state.score), (3, 0));
        assert_eq!(state.foods.len(), 1);
        assert_eq!(state.foods[0].id, 8);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = GameState::new(Tuning::default(), 0);
        state.lives = 1;
        drop_on_player(&mut state, FoodKind::Toxin);
        state
            .foods
            .push(FoodItem::new(99, FoodKind::Fish, Vec2::new(40.0, 100.0), 100.0));
        tick(&mut state, &idle());
        assert!(state.is_game_over());

        let before_x = state.player.pos.x;
        let before_y = state.foods[0].pos.y;
        let input = TickInput {
            movement: Movement::Right,
            spawn_events: 3,
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        assert!(events.is_empty());
        assert_eq!(state.player.pos.x, before_x);
        assert_eq!(state.foods.len(), 1);
        assert_eq!(state.foods[0].pos.y, before_y);
    }

    #[test]
    fn test_toxin_ending_run_stops_later_resolution() {
        let mut state = GameState::new(Tuning::default(), 0);
        state.lives = 1;
        drop_on_player(&mut state, FoodKind::Toxin);
        drop_on_player(&mut state, FoodKind::Shrimp);

        tick(&mut state, &idle());
        assert!(state.is_game_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.foods.len(), 1);
    }

    #[test]
    fn test_restart_and_quit_after_game_over() {
        let mut state = GameState::new(Tuning::default(), 0);
        state.lives = 1;
        state.score = 25;
        state.update_difficulty();
        drop_on_player(&mut state, FoodKind::Toxin);
        tick(&mut state, &idle());
        assert!(state.is_game_over());

        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &quit), vec![GameEvent::QuitRequested]);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &restart), vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!((state.score, state.lives), (0, 3));
        assert_eq!(state.fall_speed, 5.0);
        assert_eq!(state.high_score, 25);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(Tuning::default(), 0);
        state.score = 3;
        let input = TickInput {
            restart: true,
            quit: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        assert!(events.is_empty());
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_catch_triggers_eat_animation() {
        let mut state = GameState::new(Tuning::default(), 0);
        drop_on_player(&mut state, FoodKind::Fish);
        tick(&mut state, &idle());
        assert!(state.player.animation.is_eating());
        assert_eq!(state.player.frame(), 1);
    }

    #[test]
    fn test_autopilot_dodges_toxin() {
        let mut state = GameState::new(Tuning::default(), 0);
        state
            .foods
            .push(FoodItem::new(1, FoodKind::Toxin, Vec2::new(420.0, 380.0), 100.0));
        assert_eq!(autopilot(&state), Movement::Left);

        // Against the left wall it escapes right instead
        state.player.move_by(-1000.0);
        state.foods[0].pos.x = 90.0;
        assert_eq!(autopilot(&state), Movement::Right);
    }

    #[test]
    fn test_autopilot_chases_food() {
        let mut state = GameState::new(Tuning::default(), 0);
        state
            .foods
            .push(FoodItem::new(1, FoodKind::Shrimp, Vec2::new(600.0, 100.0), 100.0));
        state
            .foods
            .push(FoodItem::new(2, FoodKind::Fish, Vec2::new(150.0, 200.0), 100.0));
        assert_eq!(autopilot(&state), Movement::Left);

        state.foods.clear();
        assert_eq!(autopilot(&state), Movement::None);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let tuning = Tuning::default();
        let mut state1 =
            GameState::with_spawner(tuning.clone(), 0, Spawner::new(99999, &tuning.kind_weights));
        let mut state2 =
            GameState::with_spawner(tuning.clone(), 0, Spawner::new(99999, &tuning.kind_weights));

        for i in 0..600u32 {
            let input = TickInput {
                spawn_events: u32::from(i % 60 == 0),
                autopilot: true,
                ..Default::default()
            };
            let e1 = tick(&mut state1, &input);
            let e2 = tick(&mut state2, &input);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    #[test]
    fn test_scripted_spawns_reach_player() {
        let tuning = Tuning::default();
        let spawner = Spawner::with_chooser(1, Box::new(CycleKinds::new(vec![FoodKind::Fish])));
        let mut state = GameState::with_spawner(tuning, 0, spawner);
        tick(
            &mut state,
            &TickInput {
                spawn_events: 1,
                ..Default::default()
            },
        );
        // Park the player under the item and wait for it to land
        state.player.pos.x = state.foods[0].pos.x.clamp(80.0, 720.0);
        for _ in 0..200 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.score, 1);
        assert!(state.foods.is_empty());
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (0u8..3, 0u32..2, any::<bool>()).prop_map(|(m, spawn, restart)| TickInput {
            movement: match m {
                0 => Movement::Left,
                1 => Movement::Right,
                _ => Movement::None,
            },
            spawn_events: spawn,
            restart,
            ..Default::default()
        })
    }

    proptest! {
        #[test]
        fn prop_session_invariants(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..400)) {
            let tuning = Tuning::default();
            let spawner = Spawner::new(seed, &tuning.kind_weights);
            let mut state = GameState::with_spawner(tuning, 0, spawner);

            for input in &inputs {
                let prev_score = state.score;
                let prev_lives = state.lives;
                let prev_speed = state.fall_speed;
                let prev_high = state.high_score;
                let was_over = state.is_game_over();

                let events = tick(&mut state, input);

                let restarted = events.contains(&GameEvent::Restarted);
                prop_assert!(state.high_score >= prev_high);
                prop_assert_eq!(state.is_game_over(), state.lives == 0);

                if restarted {
                    prop_assert!(was_over);
                    prop_assert_eq!(state.score, 0);
                    prop_assert_eq!(state.lives, 3);
                    prop_assert_eq!(state.fall_speed, 5.0);
                    continue;
                }

                let eaten = events.iter().filter(|e| matches!(e, GameEvent::FoodEaten { .. })).count() as u64;
                let hits = events.iter().filter(|e| matches!(e, GameEvent::ToxinHit { .. })).count() as u8;
                prop_assert_eq!(state.score, prev_score + eaten);
                prop_assert_eq!(state.lives, prev_lives - hits);
                prop_assert!(state.fall_speed >= prev_speed);

                if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
                    prop_assert_eq!(state.high_score, prev_high.max(state.score));
                }

                let (min_x, max_x) = state.player.x_range();
                prop_assert!(state.player.pos.x >= min_x && state.player.pos.x <= max_x);
            }
        }
    }
}
