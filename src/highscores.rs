//! Best score record
//!
//! A single integer persisted under the `BEST` key of a `ScoreStore`.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Best score tracked for display and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// Store key
    pub const STORAGE_KEY: &'static str = "BEST";

    /// Load the best score from a store (negative values read as 0)
    pub fn load(store: &impl ScoreStore) -> Self {
        let raw = store.get(Self::STORAGE_KEY);
        let value = u32::try_from(raw).unwrap_or(0);
        log::info!("Best score: {}", value);
        Self { value }
    }

    /// Check if a score would set a new best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.value
    }

    /// Record a score; persists and returns true only when it beats the best
    pub fn submit(&mut self, score: u32, store: &mut impl ScoreStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        store.set(Self::STORAGE_KEY, i64::from(score));
        log::info!("New best score: {}", score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(BestScore::load(&store).value, 0);
    }

    #[test]
    fn test_load_negative_is_zero() {
        let store = MemoryStore::with_value(BestScore::STORAGE_KEY, -4);
        assert_eq!(BestScore::load(&store).value, 0);
    }

    #[test]
    fn test_submit_higher_persists() {
        let mut store = MemoryStore::with_value(BestScore::STORAGE_KEY, 3);
        let mut best = BestScore::load(&store);
        assert!(best.submit(5, &mut store));
        assert_eq!(best.value, 5);
        assert_eq!(store.get(BestScore::STORAGE_KEY), 5);
    }

    #[test]
    fn test_submit_equal_or_lower_is_ignored() {
        let mut store = MemoryStore::with_value(BestScore::STORAGE_KEY, 7);
        let mut best = BestScore::load(&store);
        assert!(!best.submit(7, &mut store));
        assert!(!best.submit(2, &mut store));
        assert_eq!(best.value, 7);
        assert_eq!(store.writes, 0);
    }
}
