//! Game session controller
//!
//! Owns the simulation state, the injected score store and RNG, and the best
//! score. A host drives it with three calls:
//! - `on_frame_tick(dt)` once per fixed step
//! - `on_input()` on every tap/click
//! - `on_contact(a, b)` for contacts detected outside the built-in step

use rand_pcg::Pcg32;

use crate::highscores::BestScore;
use crate::hud::Hud;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{self, BodyRef, GameEvent, GamePhase, GameState, SpawnRandom};

/// One play session: many runs sharing a best score
pub struct Session<S, R = Pcg32> {
    state: GameState,
    store: S,
    rng: R,
    best: BestScore,
}

impl<S: ScoreStore> Session<S, Pcg32> {
    /// Session with a seeded RNG (settings seed, or entropy)
    pub fn from_settings(settings: Settings, store: S) -> Self {
        let seed = settings.seed.unwrap_or_else(sim::entropy_seed);
        log::info!("Run seed: {}", seed);
        Self::new(settings, store, sim::seeded(seed))
    }
}

impl<S: ScoreStore, R: SpawnRandom> Session<S, R> {
    pub fn new(settings: Settings, store: S, rng: R) -> Self {
        let best = BestScore::load(&store);
        let mut state = GameState::new(settings);
        state.best_score = best.value;
        log::info!(
            "Session started ({}x{}, best {})",
            state.settings.screen_width,
            state.settings.screen_height,
            best.value
        );
        Self {
            state,
            store,
            rng,
            best,
        }
    }

    /// Advance one frame; contacts found by the step are handled in order
    pub fn on_frame_tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let step = sim::advance(&mut self.state, dt, &mut self.rng);
        let mut events = step.events;

        for event in &events {
            if let GameEvent::Spawned { id, gap_center } = event {
                log::debug!("Wall pair {} spawned (gap centre {:.1})", id, gap_center);
            }
        }

        for contact in step.contacts {
            events.extend(self.on_contact(contact.a, contact.b));
        }
        events
    }

    /// Single-button input: flap while running, restart after game over
    pub fn on_input(&mut self) -> Option<GameEvent> {
        let event = sim::apply_input(&mut self.state);
        if event == Some(GameEvent::Restarted) {
            log::info!("Restarted (best {})", self.best.value);
        }
        event
    }

    /// Apply the contact rules and keep the best score current
    pub fn on_contact(&mut self, a: BodyRef, b: BodyRef) -> Vec<GameEvent> {
        let Some(event) = sim::handle_contact(&mut self.state, a, b) else {
            return Vec::new();
        };

        let mut events = vec![event];
        match event {
            GameEvent::Scored { score } => {
                log::debug!("Score: {}", score);
                events.extend(self.submit_best(score));
            }
            GameEvent::GameOver { score } => {
                events.extend(self.submit_best(score));
                log::info!("Game over at {} (best {})", score, self.best.value);
            }
            _ => {}
        }
        events
    }

    /// Start a new run; no-op unless the last run is over
    pub fn restart(&mut self) -> bool {
        let restarted = sim::restart(&mut self.state);
        if restarted {
            log::info!("Restarted (best {})", self.best.value);
        }
        restarted
    }

    fn submit_best(&mut self, score: u32) -> Option<GameEvent> {
        if !self.best.submit(score, &mut self.store) {
            return None;
        }
        self.state.best_score = self.best.value;
        Some(GameEvent::NewBest { best: self.best.value })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.value
    }

    pub fn scroll_speed(&self) -> f32 {
        self.state.scroll_speed
    }

    /// Override the global scroll multiplier (0 freezes the world)
    pub fn set_scroll_speed(&mut self, speed: f32) {
        self.state.scroll_speed = speed.max(0.0);
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
