//! Game settings and tuning
//!
//! Every constant the session treats as fixed lives here, so a run can be
//! reshaped from JSON without touching the simulation. Persisted in
//! LocalStorage on web and as a JSON file on native.

use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    /// Visible area width (pixels)
    pub screen_width: f32,
    /// Visible area height (pixels)
    pub screen_height: f32,

    // === Background ===
    /// Height of the solid ground strip
    pub ground_height: f32,
    /// Width of one ground tile
    pub ground_tile_width: f32,
    /// Seconds for the ground to scroll one tile width
    pub ground_scroll_period: f32,
    /// Width of one cloud tile
    pub cloud_tile_width: f32,
    /// Seconds for the clouds to scroll one tile width
    pub cloud_scroll_period: f32,

    // === Walls ===
    /// Wall texture width
    pub wall_width: f32,
    /// Wall texture height
    pub wall_height: f32,
    /// Seconds between wall pair spawns
    pub spawn_interval: f32,
    /// Seconds for a wall pair to cross the screen
    pub scroll_duration: f32,

    // === Bird ===
    pub bird_width: f32,
    pub bird_height: f32,
    pub bird_mass: f32,
    /// Vertical gravity (pixels/s², negative is down)
    pub gravity: f32,
    /// Upward impulse applied on flap
    pub flap_impulse: f32,
    /// Seconds per wing frame
    pub flap_frame_time: f32,
    /// Seconds for the game-over spin
    pub spin_duration: f32,

    // === Run ===
    /// Fixed RNG seed (None = seed from entropy)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 375.0,
            screen_height: 667.0,

            ground_height: 112.0,
            ground_tile_width: 336.0,
            ground_scroll_period: 5.0,
            cloud_tile_width: 300.0,
            cloud_scroll_period: 20.0,

            wall_width: 60.0,
            wall_height: 400.0,
            spawn_interval: 2.0,
            scroll_duration: 4.0,

            bird_width: 40.0,
            bird_height: 30.0,
            bird_mass: 1.0,
            gravity: -600.0,
            flap_impulse: 420.0,
            flap_frame_time: 0.2,
            spin_duration: 1.0,

            seed: None,
        }
    }
}

impl Settings {
    /// Height of the slit between the lower and upper wall
    pub fn gap_height(&self) -> f32 {
        self.screen_height * GAP_FRACTION
    }

    /// Exclusive upper bound of the random draw for the gap position
    pub fn gap_random_range(&self) -> u32 {
        (self.screen_height * GAP_BAND_FRACTION).max(0.0) as u32
    }

    /// Lowest possible gap centre (random draw of 0)
    pub fn gap_center_min(&self) -> f32 {
        self.screen_height / 2.0 - (self.gap_height() / 2.0 + self.screen_height / 8.0)
    }

    /// Band `[min, max)` the gap centre is drawn from
    pub fn gap_center_band(&self) -> (f32, f32) {
        let min = self.gap_center_min();
        (min, min + self.gap_random_range() as f32)
    }

    /// Collision radius of the bird
    pub fn bird_radius(&self) -> f32 {
        self.bird_height / 2.0
    }

    /// Where the bird starts each run
    pub fn bird_spawn(&self) -> Vec2 {
        Vec2::new(
            self.screen_width * BIRD_SPAWN_X,
            self.screen_height * BIRD_SPAWN_Y,
        )
    }

    /// Spawn x of a new wall pair (just past the right edge)
    pub fn wall_spawn_x(&self) -> f32 {
        self.screen_width + self.wall_width / 2.0
    }

    /// Distance a wall pair travels before it is removed
    pub fn wall_travel(&self) -> f32 {
        self.screen_width + self.wall_width
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Read settings from a JSON file, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings: {e:#}");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_is_sixth_of_screen() {
        let settings = Settings::default();
        assert!((settings.gap_height() - 667.0 / 6.0).abs() < 0.001);
    }

    #[test]
    fn test_gap_band() {
        let settings = Settings {
            screen_height: 800.0,
            ..Default::default()
        };
        // centre 400, gap 133.3, range 200
        let (min, max) = settings.gap_center_band();
        assert!((min - (400.0 - 800.0 / 12.0 - 100.0)).abs() < 0.001);
        assert!((max - min - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_bird_spawn() {
        let settings = Settings::default();
        let spawn = settings.bird_spawn();
        assert!((spawn.x - 75.0).abs() < 0.001);
        assert!((spawn.y - 466.9).abs() < 0.001);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "screen_width": 500.0 }"#).unwrap();
        assert_eq!(settings.screen_width, 500.0);
        assert_eq!(settings.screen_height, Settings::default().screen_height);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("flappy-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let settings = Settings {
            seed: Some(7),
            gravity: -500.0,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("flappy-settings-does-not-exist.json");
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
