//! Flappy Bird entry point
//!
//! Native builds run a headless session with an autopilot: the clock is fed
//! fixed 60 Hz frames, the autopilot taps like a player would, and the run is
//! logged. The best score is written next to the binary's working directory.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use flappy_bird::persistence::JsonFileStore;
    use flappy_bird::platform::{FrameClock, Input};
    use flappy_bird::sim::{GameEvent, GamePhase, GameState};
    use flappy_bird::{Session, Settings};

    const SETTINGS_PATH: &str = "flappy_settings.json";
    const SCORES_PATH: &str = "flappy_scores.json";
    /// Simulated seconds to play
    const PLAY_SECONDS: f32 = 60.0;
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Pause on the game-over screen before tapping again
    const RESTART_DELAY: f32 = 1.5;

    /// Decide whether to tap this frame
    fn autopilot(state: &GameState) -> Option<Input> {
        let bird = &state.bird;
        let next = state
            .walls
            .iter()
            .filter(|w| w.x + w.wall_size.x / 2.0 >= bird.pos.x - bird.radius)
            .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        let target = match next {
            Some(pair) => pair.gap_center - pair.gap_height * 0.15,
            None => state.settings.screen_height * 0.5,
        };

        (bird.pos.y < target && bird.vel.y <= 0.0).then_some(Input::Tap)
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        log::info!("Flappy Bird (headless) starting...");

        let settings = Settings::load_or_default(Path::new(SETTINGS_PATH));
        let store = JsonFileStore::open(SCORES_PATH)?;
        let mut session = Session::from_settings(settings, store);

        let mut clock = FrameClock::default();
        let mut runs = 1u32;
        let mut over_for = 0.0f32;
        let mut elapsed = 0.0f32;

        while elapsed < PLAY_SECONDS {
            elapsed += FRAME_DT;

            match session.phase() {
                GamePhase::Running => {
                    if let Some(input) = autopilot(session.state()) {
                        if input.is_button() {
                            session.on_input();
                        }
                    }
                }
                GamePhase::GameOver => {
                    over_for += FRAME_DT;
                    if over_for >= RESTART_DELAY {
                        over_for = 0.0;
                        if session.on_input() == Some(GameEvent::Restarted) {
                            runs += 1;
                        }
                    }
                }
            }

            for _ in 0..clock.advance(FRAME_DT) {
                for event in session.on_frame_tick(clock.step()) {
                    if let GameEvent::NewBest { best } = event {
                        log::info!("Best score now {}", best);
                    }
                }
            }
        }

        let hud = session.hud();
        log::info!(
            "Played {} run(s) in {:.0}s: {} / {}",
            runs,
            PLAY_SECONDS,
            hud.score,
            hud.best
        );
        println!("{}\n{}", hud.score, hud.best);
        log::info!("Scores saved to {}", session.store().path().display());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::start`, this is just to satisfy the compiler
}
