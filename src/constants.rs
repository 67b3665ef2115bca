//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Every constant is mirrored by a field of [`crate::config::GameConfig`],
//! which can override it from `assets/game.toml` at startup.
//!
//! ## Units
//!
//! Distances are screen pixels in a y-down coordinate space whose origin is
//! the top-left corner of the playfield.  Speeds are pixels per second and
//! durations are seconds; the simulation converts with the fixed tick `dt`.
//! Rotations are radians, 0 pointing at the top of the screen, clockwise
//! positive.

// ── Screen ────────────────────────────────────────────────────────────────────

/// Playfield width (px).
pub const SCREEN_WIDTH: f32 = 1280.0;

/// Playfield height (px).
pub const SCREEN_HEIGHT: f32 = 720.0;

/// Distance beyond the playfield edge after which projectiles and aliens are
/// removed.
pub const OFFSCREEN_MARGIN: f32 = 200.0;

/// Fixed simulation rate (ticks per second).
///
/// Every timer and speed is expressed per second, so changing this only
/// affects integration granularity.  Tested range: 30–120.
pub const TICKS_PER_SECOND: f64 = 60.0;

// ── Spatial Index ─────────────────────────────────────────────────────────────

/// Edge length of a spatial-index cell (px).
///
/// Lasers are about one cell wide; large meteors span 6×6 cells.
pub const GRID_CELL_SIZE: f32 = 16.0;

// ── Player: Movement ──────────────────────────────────────────────────────────

/// Turn rate while a turn action is held (rad/s).
pub const PLAYER_ROTATION_SPEED: f32 = std::f32::consts::PI;

/// Speed cap reached by holding thrust (px/s).
///
/// The thrust ramp gains [`THRUST_RAMP_STEP`] every tick, so the cap is reached
/// after two ticks of thrust at the defaults.
pub const MAX_THRUST_SPEED: f32 = 480.0;

/// Speed gained per tick of held thrust (px/s).
pub const THRUST_RAMP_STEP: f32 = 240.0;

/// Constant backwards speed while reverse is held (px/s).
pub const REVERSE_SPEED: f32 = 180.0;

/// Seconds a released ship keeps coasting; the coast speed decays linearly to
/// zero over this window.
pub const DRIFT_DURATION: f32 = 6.0;

/// Collision radius of the ship (px).
pub const PLAYER_RADIUS: f32 = 24.0;

/// Distance between the ship centre and its exhaust plume (px).
pub const EXHAUST_OFFSET: f32 = 40.0;

// ── Player: Weapons ───────────────────────────────────────────────────────────

/// Minimum interval between two shots of a burst (s).
pub const SHOOT_COOLDOWN: f32 = 0.15;

/// Pause after a full burst before the trigger works again (s).
pub const BURST_COOLDOWN: f32 = 0.5;

/// Shots per burst.  Must be at least 1.
pub const MAX_SHOTS_PER_BURST: u32 = 3;

/// Distance ahead of the ship centre where lasers appear (px).
pub const LASER_SPAWN_OFFSET: f32 = 50.0;

/// Player laser speed (px/s).
pub const LASER_SPEED: f32 = 1000.0;

/// Half extents of the laser hitbox (px).
pub const LASER_HALF_WIDTH: f32 = 4.0;
pub const LASER_HALF_HEIGHT: f32 = 4.0;

// ── Player: Resources ─────────────────────────────────────────────────────────

/// Lives at the start of a new game.
pub const STARTING_LIVES: u32 = 3;

/// Upper bound on lives earned through level bonuses.
pub const MAX_LIVES: u32 = 6;

/// A bonus life is awarded whenever the new level number is a multiple of this.
pub const BONUS_LIFE_EVERY_LEVELS: u32 = 5;

/// Shield charges at the start of a new game.
pub const STARTING_SHIELDS: u32 = 3;

/// How long a single shield charge lasts (s).
pub const SHIELD_DURATION: f32 = 6.0;

/// Radius of the shield bubble (px).
pub const SHIELD_RADIUS: f32 = 40.0;

/// Cooldown between hyperspace jumps (s).
pub const HYPERSPACE_COOLDOWN: f32 = 10.0;

/// Random destinations tried per hyperspace jump before giving up.
///
/// A failed jump leaves the ship in place and does not start the cooldown.
pub const HYPERSPACE_MAX_ATTEMPTS: u32 = 32;

/// Frames in the ship explosion animation.
pub const DYING_FRAMES: u32 = 12;

/// Duration of one explosion frame (s).
pub const DYING_FRAME_DURATION: f32 = 0.05;

// ── Meteors ───────────────────────────────────────────────────────────────────

/// Collision radius of a large meteor (px).
pub const LARGE_METEOR_RADIUS: f32 = 48.0;

/// Collision radius of a small meteor (px).
pub const SMALL_METEOR_RADIUS: f32 = 14.0;

/// Starting base speed of freshly spawned meteors (px/s).
pub const BASE_METEOR_SPEED: f32 = 15.0;

/// Upper bound of the random extra speed added to each meteor (px/s).
pub const METEOR_SPEED_JITTER: f32 = 90.0;

/// Base-speed increase applied on every speed-up tick (px/s).
///
/// Only affects meteors spawned afterwards.
pub const METEOR_SPEED_UP_AMOUNT: f32 = 6.0;

/// Interval between base-speed increases (s).
pub const METEOR_SPEED_UP_INTERVAL: f32 = 1.0;

/// Maximum absolute spin (rad/s).
pub const METEOR_MAX_SPIN: f32 = 1.2;

/// Interval between meteor spawns while the level quota is unfilled (s).
pub const METEOR_SPAWN_INTERVAL: f32 = 0.1;

/// Extra distance beyond half the screen width for the spawn ring (px).
///
/// Ring radius = `SCREEN_WIDTH / 2 + METEOR_SPAWN_RING_PADDING`.
pub const METEOR_SPAWN_RING_PADDING: f32 = 500.0;

/// Meteors required to clear level 1.
pub const METEORS_FIRST_LEVEL: u32 = 2;

/// Additional meteors required per level after the first.
pub const METEORS_PER_LEVEL: u32 = 1;

/// Maximum number of small meteors produced by a destroyed large meteor.
pub const MAX_FRAGMENTS: u32 = 3;

/// Per-axis scatter of small meteors around the broken parent (px).
///
/// Each axis gets a magnitude in `[MIN, MAX)` with a random sign.
pub const FRAGMENT_SCATTER_MIN: f32 = 50.0;
pub const FRAGMENT_SCATTER_MAX: f32 = 100.0;

/// Sprite variants available per meteor size.
pub const METEOR_SPRITE_VARIANTS: u8 = 4;

/// Decorative meteors kept alive behind the game-over screen.
pub const GAME_OVER_METEORS: usize = 10;

// ── Aliens ────────────────────────────────────────────────────────────────────

/// Collision radius of an alien ship (px).
pub const ALIEN_RADIUS: f32 = 30.0;

/// Alien cruising speed (px/s).
pub const ALIEN_SPEED: f32 = 60.0;

/// Maximum vertical deviation of the alien heading from horizontal (rad).
pub const ALIEN_HEADING_SPREAD: f32 = 0.35;

/// Alien laser speed (px/s).
pub const ALIEN_LASER_SPEED: f32 = 1000.0;

/// Interval between alien spawn attempts (s).
pub const ALIEN_SPAWN_INTERVAL: f32 = 8.0;

/// Probability that a spawn attempt produces an alien.
pub const ALIEN_SPAWN_CHANCE: f64 = 0.75;

/// Aliens alive at once.
pub const MAX_ALIENS: usize = 4;

/// Interval between alien volleys; every live alien fires once (s).
pub const ALIEN_ATTACK_INTERVAL: f32 = 3.0;

/// Probability that a spawned alien aims at the player.
pub const INTELLIGENT_ALIEN_CHANCE: f64 = 0.5;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const LARGE_METEOR_POINTS: u32 = 1;
pub const SMALL_METEOR_POINTS: u32 = 1;
pub const ALIEN_POINTS: u32 = 50;

// ── Pacing ────────────────────────────────────────────────────────────────────

/// Delay before the first heartbeat of a level (s).
pub const BEAT_INITIAL_DELAY: f32 = 2.0;

/// Beat interval at the start of a level (s).
pub const BEAT_START_INTERVAL: f32 = 1.6;

/// Amount each beat shortens the next interval (s).
pub const BEAT_STEP: f32 = 0.025;

/// Fastest heartbeat interval (s).
pub const BEAT_MIN_INTERVAL: f32 = 0.4;

/// Interval between sweeps that reap exploded meteors and aliens (s).
pub const CLEANUP_INTERVAL: f32 = 0.2;

/// Pause on the level-start screen (s).
pub const LEVEL_START_DELAY: f32 = 2.0;

/// Stars in the background field.
pub const STAR_COUNT: usize = 400;

// ── Persistence ───────────────────────────────────────────────────────────────

/// Default high-score file, relative to the working directory.
pub const HIGH_SCORE_PATH: &str = "highscore.txt";
