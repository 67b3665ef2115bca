//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list.  The simulation
//! core takes `&GameConfig` explicitly so it can run without an ECS world.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_non_negative, validate_positive, validate_probability, GameError, GameResult,
};
use bevy::math::Vec2;
use bevy::prelude::*;
use serde::Deserialize;
use std::io::ErrorKind;

/// Where [`load_game_config`] looks for overrides.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Screen ───────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,
    pub offscreen_margin: f32,
    pub ticks_per_second: f64,

    // ── Spatial Index ────────────────────────────────────────────────────────
    pub grid_cell_size: f32,

    // ── Player: Movement ─────────────────────────────────────────────────────
    pub player_rotation_speed: f32,
    pub max_thrust_speed: f32,
    pub thrust_ramp_step: f32,
    pub reverse_speed: f32,
    pub drift_duration: f32,
    pub player_radius: f32,
    pub exhaust_offset: f32,

    // ── Player: Weapons ──────────────────────────────────────────────────────
    pub shoot_cooldown: f32,
    pub burst_cooldown: f32,
    pub max_shots_per_burst: u32,
    pub laser_spawn_offset: f32,
    pub laser_speed: f32,
    pub laser_half_width: f32,
    pub laser_half_height: f32,

    // ── Player: Resources ────────────────────────────────────────────────────
    pub starting_lives: u32,
    pub max_lives: u32,
    pub bonus_life_every_levels: u32,
    pub starting_shields: u32,
    pub shield_duration: f32,
    pub shield_radius: f32,
    pub hyperspace_cooldown: f32,
    pub hyperspace_max_attempts: u32,
    pub dying_frames: u32,
    pub dying_frame_duration: f32,

    // ── Meteors ──────────────────────────────────────────────────────────────
    pub large_meteor_radius: f32,
    pub small_meteor_radius: f32,
    pub base_meteor_speed: f32,
    pub meteor_speed_jitter: f32,
    pub meteor_speed_up_amount: f32,
    pub meteor_speed_up_interval: f32,
    pub meteor_max_spin: f32,
    pub meteor_spawn_interval: f32,
    pub meteor_spawn_ring_padding: f32,
    pub meteors_first_level: u32,
    pub meteors_per_level: u32,
    pub max_fragments: u32,
    pub fragment_scatter_min: f32,
    pub fragment_scatter_max: f32,
    pub game_over_meteors: usize,

    // ── Aliens ───────────────────────────────────────────────────────────────
    pub alien_radius: f32,
    pub alien_speed: f32,
    pub alien_heading_spread: f32,
    pub alien_laser_speed: f32,
    pub alien_spawn_interval: f32,
    pub alien_spawn_chance: f64,
    pub max_aliens: usize,
    pub alien_attack_interval: f32,
    pub intelligent_alien_chance: f64,

    // ── Scoring ──────────────────────────────────────────────────────────────
    pub large_meteor_points: u32,
    pub small_meteor_points: u32,
    pub alien_points: u32,

    // ── Pacing ───────────────────────────────────────────────────────────────
    pub beat_initial_delay: f32,
    pub beat_start_interval: f32,
    pub beat_step: f32,
    pub beat_min_interval: f32,
    pub cleanup_interval: f32,
    pub level_start_delay: f32,
    pub star_count: usize,

    // ── Persistence ──────────────────────────────────────────────────────────
    pub high_score_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Screen
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            offscreen_margin: OFFSCREEN_MARGIN,
            ticks_per_second: TICKS_PER_SECOND,
            // Spatial Index
            grid_cell_size: GRID_CELL_SIZE,
            // Player: Movement
            player_rotation_speed: PLAYER_ROTATION_SPEED,
            max_thrust_speed: MAX_THRUST_SPEED,
            thrust_ramp_step: THRUST_RAMP_STEP,
            reverse_speed: REVERSE_SPEED,
            drift_duration: DRIFT_DURATION,
            player_radius: PLAYER_RADIUS,
            exhaust_offset: EXHAUST_OFFSET,
            // Player: Weapons
            shoot_cooldown: SHOOT_COOLDOWN,
            burst_cooldown: BURST_COOLDOWN,
            max_shots_per_burst: MAX_SHOTS_PER_BURST,
            laser_spawn_offset: LASER_SPAWN_OFFSET,
            laser_speed: LASER_SPEED,
            laser_half_width: LASER_HALF_WIDTH,
            laser_half_height: LASER_HALF_HEIGHT,
            // Player: Resources
            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,
            bonus_life_every_levels: BONUS_LIFE_EVERY_LEVELS,
            starting_shields: STARTING_SHIELDS,
            shield_duration: SHIELD_DURATION,
            shield_radius: SHIELD_RADIUS,
            hyperspace_cooldown: HYPERSPACE_COOLDOWN,
            hyperspace_max_attempts: HYPERSPACE_MAX_ATTEMPTS,
            dying_frames: DYING_FRAMES,
            dying_frame_duration: DYING_FRAME_DURATION,
            // Meteors
            large_meteor_radius: LARGE_METEOR_RADIUS,
            small_meteor_radius: SMALL_METEOR_RADIUS,
            base_meteor_speed: BASE_METEOR_SPEED,
            meteor_speed_jitter: METEOR_SPEED_JITTER,
            meteor_speed_up_amount: METEOR_SPEED_UP_AMOUNT,
            meteor_speed_up_interval: METEOR_SPEED_UP_INTERVAL,
            meteor_max_spin: METEOR_MAX_SPIN,
            meteor_spawn_interval: METEOR_SPAWN_INTERVAL,
            meteor_spawn_ring_padding: METEOR_SPAWN_RING_PADDING,
            meteors_first_level: METEORS_FIRST_LEVEL,
            meteors_per_level: METEORS_PER_LEVEL,
            max_fragments: MAX_FRAGMENTS,
            fragment_scatter_min: FRAGMENT_SCATTER_MIN,
            fragment_scatter_max: FRAGMENT_SCATTER_MAX,
            game_over_meteors: GAME_OVER_METEORS,
            // Aliens
            alien_radius: ALIEN_RADIUS,
            alien_speed: ALIEN_SPEED,
            alien_heading_spread: ALIEN_HEADING_SPREAD,
            alien_laser_speed: ALIEN_LASER_SPEED,
            alien_spawn_interval: ALIEN_SPAWN_INTERVAL,
            alien_spawn_chance: ALIEN_SPAWN_CHANCE,
            max_aliens: MAX_ALIENS,
            alien_attack_interval: ALIEN_ATTACK_INTERVAL,
            intelligent_alien_chance: INTELLIGENT_ALIEN_CHANCE,
            // Scoring
            large_meteor_points: LARGE_METEOR_POINTS,
            small_meteor_points: SMALL_METEOR_POINTS,
            alien_points: ALIEN_POINTS,
            // Pacing
            beat_initial_delay: BEAT_INITIAL_DELAY,
            beat_start_interval: BEAT_START_INTERVAL,
            beat_step: BEAT_STEP,
            beat_min_interval: BEAT_MIN_INTERVAL,
            cleanup_interval: CLEANUP_INTERVAL,
            level_start_delay: LEVEL_START_DELAY,
            star_count: STAR_COUNT,
            // Persistence
            high_score_path: HIGH_SCORE_PATH.to_string(),
        }
    }
}

impl GameConfig {
    /// Playfield size as a vector.
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Centre of the playfield in screen coordinates.
    pub fn screen_center(&self) -> Vec2 {
        self.screen_size() * 0.5
    }

    /// Radius of the ring new meteors are spawned on.
    pub fn meteor_spawn_ring_radius(&self) -> f32 {
        self.screen_width * 0.5 + self.meteor_spawn_ring_padding
    }

    /// Meteors that must be spawned and destroyed to clear `level` (1-based).
    pub fn meteors_for_level(&self, level: u32) -> u32 {
        self.meteors_first_level + level.saturating_sub(1) * self.meteors_per_level
    }

    /// Rejects values that would break the simulation (zero-sized grid cells,
    /// empty bursts, inverted scatter ranges, ...).
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("screen_width", self.screen_width as f64)?;
        validate_positive("screen_height", self.screen_height as f64)?;
        validate_non_negative("offscreen_margin", self.offscreen_margin as f64)?;
        validate_positive("ticks_per_second", self.ticks_per_second)?;
        validate_positive("grid_cell_size", self.grid_cell_size as f64)?;
        validate_positive("max_shots_per_burst", self.max_shots_per_burst as f64)?;
        validate_positive(
            "hyperspace_max_attempts",
            self.hyperspace_max_attempts as f64,
        )?;
        validate_positive("player_radius", self.player_radius as f64)?;
        validate_positive("large_meteor_radius", self.large_meteor_radius as f64)?;
        validate_positive("small_meteor_radius", self.small_meteor_radius as f64)?;
        validate_non_negative("drift_duration", self.drift_duration as f64)?;
        validate_non_negative("shield_duration", self.shield_duration as f64)?;
        validate_non_negative("meteor_speed_jitter", self.meteor_speed_jitter as f64)?;
        validate_non_negative("meteor_max_spin", self.meteor_max_spin as f64)?;
        validate_non_negative("fragment_scatter_min", self.fragment_scatter_min as f64)?;
        validate_probability("alien_spawn_chance", self.alien_spawn_chance)?;
        validate_probability("intelligent_alien_chance", self.intelligent_alien_chance)?;
        if self.fragment_scatter_max <= self.fragment_scatter_min {
            return Err(GameError::InvalidConfig {
                name: "fragment_scatter_max",
                value: self.fragment_scatter_max as f64,
                expected: "(fragment_scatter_min, ∞)",
            });
        }
        if self.beat_min_interval > self.beat_start_interval {
            return Err(GameError::InvalidConfig {
                name: "beat_min_interval",
                value: self.beat_min_interval as f64,
                expected: "[0.0, beat_start_interval]",
            });
        }
        Ok(())
    }
}

/// Reads and validates a config file.
///
/// Returns `Ok(None)` when the file does not exist, which is the normal case
/// for a fresh checkout.
pub fn read_game_config(path: &str) -> GameResult<Option<GameConfig>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(GameError::ConfigRead {
                path: path.to_string(),
                source,
            })
        }
    };
    let config = parse_game_config(path, &contents)?;
    Ok(Some(config))
}

/// Parses TOML text into a validated [`GameConfig`].
pub fn parse_game_config(path: &str, contents: &str) -> GameResult<GameConfig> {
    let config: GameConfig = toml::from_str(contents).map_err(|err| GameError::ConfigParse {
        path: path.to_string(),
        message: err.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are reported but do not abort the game.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match read_game_config(CONFIG_PATH) {
        Ok(Some(loaded)) => {
            *config = loaded;
            println!("✓ Loaded game config from {CONFIG_PATH}");
        }
        Ok(None) => {
            println!("ℹ No {CONFIG_PATH} found; using compiled defaults");
            info!("no config file at {}", CONFIG_PATH);
        }
        Err(err) => {
            eprintln!("⚠ {err}; using defaults");
            warn!("config rejected: {}", err);
        }
    }
}
