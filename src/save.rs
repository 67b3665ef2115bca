//! High-score persistence.
//!
//! The stored value is a single non-negative integer as plain text (leading
//! and trailing whitespace is ignored).  It is read once at startup and
//! written once per game over, and only when the old record was beaten.

use crate::error::{GameError, GameResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Where the best score lives between sessions.
pub trait HighScoreStore {
    fn load(&self) -> GameResult<u32>;
    fn save(&mut self, score: u32) -> GameResult<()>;
}

/// Parses the on-disk representation.
pub fn parse_high_score(contents: &str) -> GameResult<u32> {
    contents
        .trim()
        .parse::<u32>()
        .map_err(|_| GameError::HighScoreParse {
            content: contents.to_string(),
        })
}

/// Plain-text file store.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> GameResult<u32> {
        let contents = fs::read_to_string(&self.path).map_err(|source| GameError::HighScoreRead {
            path: self.path.display().to_string(),
            source,
        })?;
        parse_high_score(&contents)
    }

    fn save(&mut self, score: u32) -> GameResult<()> {
        let write_err = |source| GameError::HighScoreWrite {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, format!("{score}\n")).map_err(write_err)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    stored: Option<u32>,
    saves: Vec<u32>,
    fail_saves: bool,
}

/// In-memory store for headless runs and tests.
///
/// Clones share state, so a test can keep one handle and hand another to the
/// game, then inspect every save the game made.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryHighScoreStore {
    /// A store that already holds `score`.
    pub fn with_score(score: u32) -> Self {
        let store = Self::default();
        store.lock().stored = Some(score);
        store
    }

    /// Makes every subsequent save fail with a write error.
    pub fn fail_saves(&self) {
        self.lock().fail_saves = true;
    }

    /// Every value passed to a successful `save`, in order.
    pub fn saves(&self) -> Vec<u32> {
        self.lock().saves.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> GameResult<u32> {
        self.lock().stored.ok_or_else(|| GameError::HighScoreRead {
            path: "<memory>".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no score stored"),
        })
    }

    fn save(&mut self, score: u32) -> GameResult<()> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(GameError::HighScoreWrite {
                path: "<memory>".to_string(),
                source: std::io::Error::other("save disabled"),
            });
        }
        state.stored = Some(score);
        state.saves.push(score);
        Ok(())
    }
}
