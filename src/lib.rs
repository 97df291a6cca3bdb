//! Flappy Bird - a side-scrolling arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, contacts, spawning, game state)
//! - `session`: Game session controller (input, scoring, best score)
//! - `persistence`: Key-value score storage
//! - `platform`: Fixed timestep clock and input mapping
//! - `settings`: Data-driven game tuning
//! - `web`: Browser bindings (WASM only)

pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::BestScore;
pub use persistence::{MemoryStore, ScoreStore};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Collision categories
    pub const BIRD_CATEGORY: u32 = 1 << 0;
    pub const GROUND_CATEGORY: u32 = 1 << 1;
    pub const WALL_CATEGORY: u32 = 1 << 2;
    pub const SCORE_CATEGORY: u32 = 1 << 3;

    /// Bird spawn point as a fraction of the screen size
    pub const BIRD_SPAWN_X: f32 = 0.2;
    pub const BIRD_SPAWN_Y: f32 = 0.7;

    /// Gap height as a fraction of the screen height
    pub const GAP_FRACTION: f32 = 1.0 / 6.0;
    /// Random band of the gap centre as a fraction of the screen height
    pub const GAP_BAND_FRACTION: f32 = 1.0 / 4.0;

    /// Game-over spin: radians per unit of bird height
    pub const SPIN_PER_HEIGHT: f32 = std::f32::consts::PI * 0.01;
}

/// Number of tiles needed to cover `span` with one spare tile on each side
#[inline]
pub fn tiles_needed(span: f32, tile_width: f32) -> usize {
    if tile_width <= 0.0 {
        return 0;
    }
    (2.0 + span / tile_width).ceil() as usize
}

/// Wrap `value` into `[0, period)`
#[inline]
pub fn wrap(value: f32, period: f32) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    value.rem_euclid(period)
}
