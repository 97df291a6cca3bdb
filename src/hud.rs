//! Score labels shown in the top-left corner

use crate::sim::{GamePhase, GameState};

/// Text for the HUD labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub best: String,
    /// Shown while the run is over
    pub prompt: Option<&'static str>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: score_label(state.score),
            best: best_label(state.best_score),
            prompt: (state.phase == GamePhase::GameOver).then_some("Tap to restart"),
        }
    }
}

pub fn score_label(score: u32) -> String {
    format!("Score:{}", score)
}

pub fn best_label(best: u32) -> String {
    format!("Best Score:{}", best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_labels() {
        assert_eq!(score_label(0), "Score:0");
        assert_eq!(best_label(12), "Best Score:12");
    }

    #[test]
    fn test_prompt_only_after_game_over() {
        let mut state = GameState::new(Settings::default());
        assert_eq!(Hud::from_state(&state).prompt, None);
        state.phase = GamePhase::GameOver;
        assert!(Hud::from_state(&state).prompt.is_some());
    }
}
