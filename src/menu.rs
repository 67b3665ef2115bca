//! Scene overlays: `GameState` definition and `OverlayPlugin`.
//!
//! `GameState` mirrors [`crate::game::Game`]'s active scene kind; the
//! simulation sets it, this module only reacts to it.
//!
//! ## States
//!
//! | State             | Description                                      |
//! |-------------------|--------------------------------------------------|
//! | `Playing`         | Initial state; a level is running                |
//! | `LevelTransition` | Level cleared; "LEVEL N" banner over the stars   |
//! | `GameOver`        | No lives left; final score and play-again prompt |
//!
//! ## Systems (registered by `OverlayPlugin`)
//!
//! | System                    | Schedule                   | Purpose                      |
//! |---------------------------|----------------------------|------------------------------|
//! | `setup_level_banner`      | `OnEnter(LevelTransition)` | Spawn the level banner       |
//! | `cleanup_level_banner`    | `OnExit(LevelTransition)`  | Despawn the level banner     |
//! | `setup_game_over`         | `OnEnter(GameOver)`        | Spawn the game-over card     |
//! | `cleanup_game_over`       | `OnExit(GameOver)`         | Despawn the game-over card   |
//! | `game_over_button_system` | `Update / in GameOver`     | Handle Play Again / Quit     |

mod game_over;
mod level_start;

pub use game_over::{cleanup_game_over, game_over_button_system, setup_game_over};
pub use level_start::{cleanup_level_banner, setup_level_banner};

use crate::audio::CueBoard;
use crate::config::GameConfig;
use crate::game::Game;
use crate::scene::{SceneKind, Transition};
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Which scene is on screen, as seen by Bevy.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// The app boots straight into a game.
    #[default]
    Playing,
    LevelTransition,
    GameOver,
}

impl From<SceneKind> for GameState {
    fn from(kind: SceneKind) -> Self {
        match kind {
            SceneKind::Playing => GameState::Playing,
            SceneKind::LevelTransition => GameState::LevelTransition,
            SceneKind::GameOver => GameState::GameOver,
        }
    }
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the level banner; despawned on `OnExit(LevelTransition)`.
#[derive(Component)]
pub struct LevelBannerRoot;

/// Root node of the game-over card; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "Play Again" button.
#[derive(Component)]
pub struct PlayAgainButton;

/// Tags the "Quit" button.
#[derive(Component)]
pub struct QuitButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState` and the overlay setup/teardown systems.
///
/// Add this plugin **before** [`crate::simulation::SimulationPlugin`] so the
/// state exists when the simulation starts mirroring into it.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::LevelTransition), setup_level_banner)
            .add_systems(OnExit(GameState::LevelTransition), cleanup_level_banner)
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup_game_over)
            .add_systems(
                Update,
                game_over_button_system
                    .run_if(in_state(GameState::GameOver).and(resource_exists::<Game>)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
fn hint_color() -> Color {
    Color::srgb(0.40, 0.40, 0.48)
}
fn again_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
fn again_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
fn again_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Full-screen transparent root that centres its children.
fn overlay_root() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        flex_direction: FlexDirection::Column,
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        ..default()
    }
}
