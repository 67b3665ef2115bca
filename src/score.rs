//! High-score tracking.

use crate::save::HighScoreStore;
use bevy::log::{error, info, warn};

/// The persisted record plus the best score seen this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    /// Value last read from or written to the store.
    stored: u32,
    /// Best live score observed this session.
    session_best: u32,
}

impl HighScore {
    /// Reads the record.  A missing or malformed record counts as 0.
    pub fn load(store: &dyn HighScoreStore) -> Self {
        let stored = match store.load() {
            Ok(score) => {
                info!("Loaded high score {}", score);
                score
            }
            Err(err) => {
                warn!("{}; starting with high score 0", err);
                0
            }
        };
        Self {
            stored,
            session_best: stored,
        }
    }

    pub fn stored(&self) -> u32 {
        self.stored
    }

    /// Value shown on the HUD: the record, or the live score once beaten.
    pub fn best(&self) -> u32 {
        self.stored.max(self.session_best)
    }

    /// Feeds the current live score into the HUD value.
    pub fn observe(&mut self, score: u32) {
        self.session_best = self.session_best.max(score);
    }

    pub fn is_new_record(&self, score: u32) -> bool {
        score > self.stored
    }

    /// Persists `score` if it beats the stored record.  Returns whether it
    /// was a new record.  A failed write is logged; the in-memory record is
    /// still raised so the session stays consistent.
    pub fn commit(&mut self, score: u32, store: &mut dyn HighScoreStore) -> bool {
        self.observe(score);
        if !self.is_new_record(score) {
            return false;
        }
        self.stored = score;
        match store.save(score) {
            Ok(()) => info!("Saved new high score {}", score),
            Err(err) => error!("Failed to save high score {}: {}", score, err),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::MemoryHighScoreStore;

    #[test]
    fn missing_record_defaults_to_zero() {
        let store = MemoryHighScoreStore::default();
        assert_eq!(HighScore::load(&store).stored(), 0);
    }

    #[test]
    fn commit_saves_only_when_beaten() {
        let mut store = MemoryHighScoreStore::with_score(100);
        let observer = store.clone();
        let mut high = HighScore::load(&store);
        assert!(!high.commit(100, &mut store));
        assert!(!high.commit(40, &mut store));
        assert!(observer.saves().is_empty());
        assert!(high.commit(150, &mut store));
        assert_eq!(observer.saves(), vec![150]);
        assert_eq!(high.stored(), 150);
    }

    #[test]
    fn observe_tracks_live_best_without_saving() {
        let store = MemoryHighScoreStore::with_score(20);
        let mut high = HighScore::load(&store);
        high.observe(35);
        assert_eq!(high.best(), 35);
        assert_eq!(high.stored(), 20);
        assert!(store.saves().is_empty());
    }

    #[test]
    fn failed_save_still_counts_as_record() {
        let mut store = MemoryHighScoreStore::default();
        store.fail_saves();
        let mut high = HighScore::load(&store);
        assert!(high.commit(7, &mut store));
        assert_eq!(high.stored(), 7);
    }
}
