//! Scene state machine.
//!
//! Exactly one [`Scene`] is active.  A scene's `update` returns a
//! [`Transition`] when it is done, and [`next_scene`] builds the replacement
//! from it.  Everything that survives a transition travels inside the
//! transition value ([`Carryover`]), so no scene reaches into another.
//!
//! ```text
//!            LevelCleared                 BeginLevel (after delay)
//! Playing ───────────────▶ LevelTransition ───────────────────────▶ Playing
//!    │ ▲ Respawn (life lost, lives left)
//!    │ └──────┘
//!    │ GameOver (no lives left)        Restart
//!    └──────────────────────────▶ GameOver ───▶ Playing (new game)
//! ```

pub mod game_over;
pub mod level_start;
pub mod playing;

pub use game_over::GameOverScene;
pub use level_start::LevelStartScene;
pub use playing::PlayingScene;

use crate::config::GameConfig;
use crate::effects::{generate_starfield, Star};
use crate::render::Canvas;
use crate::score::HighScore;
use crate::world::{GameRng, Tick};

/// Which scene is active, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Playing,
    LevelTransition,
    GameOver,
}

/// State that survives a scene change within one game.
#[derive(Debug, Clone, PartialEq)]
pub struct Carryover {
    /// 1-based level number the next scene plays (or announces).
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub shields: u32,
    pub stars: Vec<Star>,
}

impl Carryover {
    /// Level 1, no score, full lives and shields, fresh starfield.
    pub fn new_game(config: &GameConfig, rng: &mut GameRng) -> Self {
        Self {
            level: 1,
            score: 0,
            lives: config.starting_lives,
            shields: config.starting_shields,
            stars: generate_starfield(config, rng),
        }
    }
}

/// Why the active scene ends.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Ship destroyed with lives left: replay the level.
    Respawn(Carryover),
    /// Quota cleared: announce the next level (carryover already holds it).
    LevelCleared(Carryover),
    /// Announcement over: play the level.
    BeginLevel(Carryover),
    /// Last life lost.
    GameOver { score: u32, level: u32 },
    /// Start a new game from the game-over screen.
    Restart,
}

pub enum Scene {
    Playing(PlayingScene),
    LevelTransition(LevelStartScene),
    GameOver(GameOverScene),
}

impl Scene {
    /// A brand-new game at level 1.
    pub fn new_game(config: &GameConfig, rng: &mut GameRng) -> Self {
        Scene::Playing(PlayingScene::new(Carryover::new_game(config, rng), config))
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Playing(_) => SceneKind::Playing,
            Scene::LevelTransition(_) => SceneKind::LevelTransition,
            Scene::GameOver(_) => SceneKind::GameOver,
        }
    }

    pub fn update(&mut self, tick: &mut Tick<'_>) -> Option<Transition> {
        match self {
            Scene::Playing(scene) => scene.update(tick),
            Scene::LevelTransition(scene) => scene.update(tick),
            Scene::GameOver(scene) => scene.update(tick),
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas, config: &GameConfig) {
        match self {
            Scene::Playing(scene) => scene.render(canvas, config),
            Scene::LevelTransition(scene) => scene.render(canvas),
            Scene::GameOver(scene) => scene.render(canvas, config),
        }
    }

    /// Score to show on the HUD.
    pub fn score(&self) -> u32 {
        match self {
            Scene::Playing(scene) => scene.score,
            Scene::LevelTransition(scene) => scene.carryover.score,
            Scene::GameOver(scene) => scene.score,
        }
    }

    /// Level to show on the HUD.
    pub fn level(&self) -> u32 {
        match self {
            Scene::Playing(scene) => scene.level(),
            Scene::LevelTransition(scene) => scene.carryover.level,
            Scene::GameOver(scene) => scene.level,
        }
    }
}

/// Builds the scene a transition leads to.
///
/// `high_score` must be the record *before* this game's score is committed;
/// it decides whether the game-over screen announces a new record.
pub fn next_scene(
    transition: Transition,
    high_score: &HighScore,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Scene {
    match transition {
        Transition::Respawn(carryover) | Transition::BeginLevel(carryover) => {
            Scene::Playing(PlayingScene::new(carryover, config))
        }
        Transition::LevelCleared(carryover) => {
            Scene::LevelTransition(LevelStartScene::new(carryover, config))
        }
        Transition::GameOver { score, level } => Scene::GameOver(GameOverScene::new(
            score,
            level,
            high_score.is_new_record(score),
            config,
            rng,
        )),
        Transition::Restart => Scene::new_game(config, rng),
    }
}
