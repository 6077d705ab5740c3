//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a short list of notes; only the player is web-specific.

use crate::sim::{FoodKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Shrimp caught
    ChompShrimp,
    /// Fish caught
    ChompFish,
    /// Toxin caught, one life lost
    ToxinHit,
    /// Fall speed increased
    SpeedUp,
    GameOver,
    /// New high score
    HighScore,
    Restart,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One tone: start frequency sliding to end frequency, with a decaying gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub wave: Wave,
    pub freq: f32,
    pub end_freq: f32,
    /// Seconds after the effect starts
    pub delay: f64,
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
}

impl Note {
    const fn tone(wave: Wave, freq: f32, delay: f64, duration: f64, gain: f32) -> Self {
        Self {
            wave,
            freq,
            end_freq: freq,
            delay,
            duration,
            gain,
        }
    }

    const fn slide(wave: Wave, freq: f32, end_freq: f32, duration: f64, gain: f32) -> Self {
        Self {
            wave,
            freq,
            end_freq,
            delay: 0.0,
            duration,
            gain,
        }
    }
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FoodEaten {
                kind: FoodKind::Shrimp,
                ..
            } => Some(SoundEffect::ChompShrimp),
            GameEvent::FoodEaten { .. } => Some(SoundEffect::ChompFish),
            GameEvent::ToxinHit { lives, .. } if *lives > 0 => Some(SoundEffect::ToxinHit),
            // The game-over sting replaces the hit sound on the last life
            GameEvent::ToxinHit { .. } => None,
            GameEvent::SpeedUp { .. } => Some(SoundEffect::SpeedUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::Restarted => Some(SoundEffect::Restart),
            GameEvent::FoodSpawned { .. }
            | GameEvent::FoodMissed { .. }
            | GameEvent::QuitRequested => None,
        }
    }

    /// Notes making up this effect
    pub fn notes(&self) -> Vec<Note> {
        match self {
            // Quick upward blip
            SoundEffect::ChompShrimp => vec![Note::slide(Wave::Sine, 500.0, 900.0, 0.08, 0.4)],
            // Lower, rounder gulp
            SoundEffect::ChompFish => vec![Note::slide(Wave::Triangle, 300.0, 650.0, 0.12, 0.45)],
            // Harsh buzz dropping off
            SoundEffect::ToxinHit => vec![
                Note::slide(Wave::Sawtooth, 220.0, 70.0, 0.3, 0.35),
                Note::tone(Wave::Square, 110.0, 0.0, 0.2, 0.15),
            ],
            SoundEffect::SpeedUp => [600.0, 800.0]
                .iter()
                .enumerate()
                .map(|(i, f)| Note::tone(Wave::Triangle, *f, i as f64 * 0.07, 0.1, 0.25))
                .collect(),
            // Sad descending
            SoundEffect::GameOver => [400.0, 350.0, 300.0, 200.0]
                .iter()
                .enumerate()
                .map(|(i, f)| Note::tone(Wave::Sine, *f, i as f64 * 0.2, 0.4, 0.3))
                .collect(),
            // Celebratory
            SoundEffect::HighScore => [500.0, 600.0, 700.0, 800.0, 1000.0]
                .iter()
                .enumerate()
                .map(|(i, f)| Note::tone(Wave::Triangle, *f, 0.8 + i as f64 * 0.08, 0.3, 0.25))
                .collect(),
            SoundEffect::Restart => vec![Note::slide(Wave::Sine, 300.0, 600.0, 0.15, 0.3)],
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, OscillatorType};

    use super::{Note, SoundEffect, Wave};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        /// Temporarily silenced (tab hidden / window blurred)
        suspended: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
                suspended: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
        }

        pub fn set_suspended(&mut self, suspended: bool) {
            self.suspended = suspended;
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.suspended || self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for note in effect.notes() {
                self.play_note(ctx, &note);
            }
        }

        fn play_note(&self, ctx: &AudioContext, note: &Note) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match note.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Triangle => OscillatorType::Triangle,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let t = ctx.current_time() + note.delay;
            let end = t + note.duration;
            gain.gain()
                .set_value_at_time(note.gain * self.volume, t)
                .ok()?;
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;
            osc.frequency().set_value_at_time(note.freq, t).ok()?;
            if note.end_freq != note.freq {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(note.end_freq, end)
                    .ok()?;
            }

            osc.start_with_when(t).ok()?;
            osc.stop_with_when(end + 0.05).ok()?;
            Some(())
        }
    }
}
