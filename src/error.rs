//! Game error types.
//!
//! Nothing in the per-tick simulation can fail; errors only arise at the
//! edges (high-score persistence, configuration loading).  Callers log them
//! and degrade gracefully instead of aborting the game.
//!
//! ## Usage
//!
//! ```rust
//! use asteroids::error::{GameError, GameResult};
//!
//! fn parse(text: &str) -> GameResult<u32> {
//!     text.trim().parse().map_err(|_| GameError::HighScoreParse {
//!         content: text.to_string(),
//!     })
//! }
//! ```

use std::fmt;
use std::io;

/// Top-level error enum for the game.
#[derive(Debug)]
pub enum GameError {
    /// The high-score file could not be read (usually: it does not exist yet).
    HighScoreRead {
        path: String,
        source: io::Error,
    },

    /// The high-score file does not contain a plain non-negative integer.
    HighScoreParse {
        /// Raw file contents, for the log line.
        content: String,
    },

    /// The high-score file could not be written.
    HighScoreWrite {
        path: String,
        source: io::Error,
    },

    /// The configuration file exists but could not be read.
    ConfigRead {
        path: String,
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        path: String,
        message: String,
    },

    /// A configuration value is outside the range the simulation supports.
    InvalidConfig {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::HighScoreRead { path, source } => {
                write!(f, "could not read high score from '{}': {}", path, source)
            }
            GameError::HighScoreParse { content } => write!(
                f,
                "high score file does not hold a non-negative integer: {:?}",
                content
            ),
            GameError::HighScoreWrite { path, source } => {
                write!(f, "could not write high score to '{}': {}", path, source)
            }
            GameError::ConfigRead { path, source } => {
                write!(f, "could not read config '{}': {}", path, source)
            }
            GameError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            GameError::InvalidConfig {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::HighScoreRead { source, .. }
            | GameError::HighScoreWrite { source, .. }
            | GameError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f64) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f64) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is a probability.
pub fn validate_probability(name: &'static str, value: f64) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "[0.0, 1.0]",
        })
    }
}
