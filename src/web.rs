//! Browser bindings
//!
//! The page owns the canvas and the animation frame loop; it forwards frame
//! deltas and taps here and reads back what to draw. Settings and the best
//! score live in LocalStorage.

use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorageStore;
use crate::platform::FrameClock;
use crate::sim::GameEvent;
use crate::{Session, Settings};

/// Best score keys are stored without a prefix (`BEST`)
const SCORE_PREFIX: &str = "";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Flappy Bird starting...");
}

/// A session driven by `requestAnimationFrame`
#[wasm_bindgen]
pub struct WebSession {
    session: Session<LocalStorageStore>,
    clock: FrameClock,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSession {
        let settings = Settings::load();
        let store = LocalStorageStore::new(SCORE_PREFIX);
        Self {
            session: Session::from_settings(settings, store),
            clock: FrameClock::default(),
        }
    }

    /// Feed a frame delta in seconds; returns true when the run just ended
    pub fn frame(&mut self, dt: f32) -> bool {
        let mut ended = false;
        for _ in 0..self.clock.advance(dt) {
            let events = self.session.on_frame_tick(self.clock.step());
            ended |= events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }));
        }
        ended
    }

    /// Pointer down, touch start or the space bar
    pub fn tap(&mut self) {
        self.session.on_input();
    }

    pub fn score_label(&self) -> String {
        self.session.hud().score
    }

    pub fn best_label(&self) -> String {
        self.session.hud().best
    }

    pub fn prompt(&self) -> Option<String> {
        self.session.hud().prompt.map(str::to_string)
    }

    /// `[x, y, rotation, wing frame]`
    pub fn bird(&self) -> Vec<f32> {
        let bird = &self.session.state().bird;
        vec![bird.pos.x, bird.pos.y, bird.rotation, bird.wings.frame as f32]
    }

    /// Flattened `[x, gap centre, gap height]` per live wall pair
    pub fn walls(&self) -> Vec<f32> {
        self.session
            .state()
            .walls
            .iter()
            .flat_map(|w| [w.x, w.gap_center, w.gap_height])
            .collect()
    }

    /// Left edges of the ground tiles
    pub fn ground_tiles(&self) -> Vec<f32> {
        self.session.state().ground.tile_positions().collect()
    }

    /// Left edges of the cloud tiles
    pub fn cloud_tiles(&self) -> Vec<f32> {
        self.session.state().clouds.tile_positions().collect()
    }

    pub fn save_settings(&self) {
        self.session.state().settings.save();
    }
}

impl Default for WebSession {
    fn default() -> Self {
        Self::new()
    }
}
