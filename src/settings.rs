//! Player preferences
//!
//! Persisted as JSON in platform storage, separately from the high score.

use serde::{Deserialize, Serialize};

use crate::keys;
use crate::platform::storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Mute when the tab is hidden or the window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Start in autopilot (demo) mode
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,

            show_fps: false,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Effective sound effect gain (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Clamp volumes into range after loading untrusted data
    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Settings>(json)
            .ok()
            .map(Self::sanitized)
    }

    /// Load settings from platform storage
    pub fn load() -> Self {
        if let Some(json) = storage::read(keys::SETTINGS) {
            if let Some(settings) = Self::from_json(&json) {
                log::info!("Loaded settings");
                return settings;
            }
            log::warn!("Stored settings are unreadable, using defaults");
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to platform storage
    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage::write(keys::SETTINGS, &json) {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_sfx_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_from_json_fills_missing_and_clamps() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.0, "show_fps": true }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert!(settings.show_fps);
        assert!(settings.mute_on_blur);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert_eq!(Settings::from_json("{"), None);
    }
}
