//! End-to-end scenarios driven through [`Game::update`], one fixed tick at a
//! time, with an in-memory high-score store and a seeded random source.
//!
//! Covered scenarios:
//! 1. Losing the last life ends the game and saves a beaten record once.
//! 2. A record that is not beaten is never written.
//! 3. Losing a life with lives left restarts the level, score kept.
//! 4. Clearing a level shows the level banner, then plays the next level.
//! 5. Every fifth level grants a bonus life.
//! 6. A laser shot breaks a large meteor and scores.
//! 7. Restart resets everything but the high score; quit works anywhere.
//! 8. Missing or malformed high-score files count as 0.

use asteroids::audio::CueBoard;
use asteroids::config::GameConfig;
use asteroids::game::{Game, TickOutcome};
use asteroids::input::{Action, ActionInput};
use asteroids::meteor::{MeteorSeed, MeteorSize};
use asteroids::save::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
use asteroids::scene::{PlayingScene, Scene, SceneKind};
use asteroids::world::GameRng;
use bevy::math::Vec2;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Harness {
    game: Game,
    config: GameConfig,
    audio: CueBoard,
    store: MemoryHighScoreStore,
}

impl Harness {
    fn new(stored: Option<u32>) -> Self {
        let store = stored.map_or_else(
            MemoryHighScoreStore::default,
            MemoryHighScoreStore::with_score,
        );
        let config = GameConfig::default();
        let game = Game::new(&config, Box::new(store.clone()), GameRng::seed_from_u64(99));
        Self {
            game,
            config,
            audio: CueBoard::default(),
            store,
        }
    }

    fn tick(&mut self, input: ActionInput) -> TickOutcome {
        self.audio.advance(DT);
        self.game.update(&input, &mut self.audio, &self.config, DT)
    }

    /// Ticks with no input until the scene kind changes (or `limit` ticks).
    fn run_until_change(&mut self, limit: usize) -> SceneKind {
        let start = self.game.kind();
        for _ in 0..limit {
            self.tick(ActionInput::default());
            if self.game.kind() != start {
                break;
            }
        }
        self.game.kind()
    }

    fn playing(&mut self) -> &mut PlayingScene {
        match self.game.scene_mut() {
            Scene::Playing(scene) => scene,
            _ => panic!("expected the playing scene"),
        }
    }

    /// Parks a motionless meteor on top of the ship.
    fn meteor_on_ship(&mut self) {
        let config = self.config.clone();
        let scene = self.playing();
        let seed = still_meteor(MeteorSize::Small, scene.player.position);
        scene.field.spawn_meteor(seed, &config);
    }
}

fn still_meteor(size: MeteorSize, position: Vec2) -> MeteorSeed {
    MeteorSeed {
        size,
        position,
        velocity: Vec2::ZERO,
        rotation: 0.0,
        spin: 0.0,
        variant: 0,
        entered: true,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn lethal_hit_on_last_life_saves_record_once() {
    let mut h = Harness::new(Some(0));
    h.playing().player.lives = 1;
    h.playing().score = 5;
    h.meteor_on_ship();

    assert_eq!(h.run_until_change(240), SceneKind::GameOver);
    assert_eq!(h.store.saves(), vec![5]);
    assert_eq!(h.game.high_score().stored(), 5);
    match h.game.scene() {
        Scene::GameOver(over) => {
            assert_eq!(over.score, 5);
            assert!(over.new_high_score);
        }
        _ => panic!("expected the game-over scene"),
    }

    // Lingering on the game-over screen never saves again.
    for _ in 0..300 {
        h.tick(ActionInput::default());
    }
    assert_eq!(h.store.saves(), vec![5]);
}

#[test]
fn unbeaten_record_is_not_written() {
    let mut h = Harness::new(Some(50));
    h.playing().player.lives = 1;
    h.playing().score = 50;
    h.meteor_on_ship();

    assert_eq!(h.run_until_change(240), SceneKind::GameOver);
    assert!(h.store.saves().is_empty());
    assert_eq!(h.game.high_score().stored(), 50);
}

#[test]
fn lost_life_restarts_level_with_score_kept() {
    let mut h = Harness::new(None);
    h.playing().director.level = 3;
    h.playing().score = 9;
    h.meteor_on_ship();

    // The respawn is Playing → Playing, so watch the lives instead.
    for _ in 0..240 {
        h.tick(ActionInput::default());
        if h.playing().player.lives == 2 {
            break;
        }
    }
    let center = h.config.screen_center();
    let scene = h.playing();
    assert_eq!(scene.player.lives, 2);
    assert_eq!(scene.level(), 3);
    assert_eq!(scene.score, 9);
    assert!(scene.player.is_alive());
    assert_eq!(scene.player.position, center);
}

#[test]
fn cleared_level_announces_then_plays_next() {
    let mut h = Harness::new(None);
    h.playing().score = 30;
    let target = h.playing().director.meteor_target;
    h.playing().director.meteors_spawned = target;

    assert_eq!(h.run_until_change(1), SceneKind::LevelTransition);
    assert_eq!(h.game.scene().level(), 2);
    assert_eq!(h.game.scene().score(), 30);

    // The banner stays up for the configured delay.
    assert_eq!(h.run_until_change(200), SceneKind::Playing);
    let scene = h.playing();
    assert_eq!(scene.level(), 2);
    assert_eq!(scene.score, 30);
    assert_eq!(
        scene.director.meteor_target,
        GameConfig::default().meteors_for_level(2)
    );
}

#[test]
fn fifth_level_grants_bonus_life() {
    let mut h = Harness::new(None);
    h.playing().director.level = 4;
    let target = h.playing().director.meteor_target;
    h.playing().director.meteors_spawned = target;

    assert_eq!(h.run_until_change(1), SceneKind::LevelTransition);
    assert_eq!(h.run_until_change(200), SceneKind::Playing);
    let lives = h.playing().player.lives;
    assert_eq!(lives, h.config.starting_lives + 1);
    assert_eq!(h.game.scene().level(), 5);
}

#[test]
fn laser_breaks_large_meteor_for_points() {
    let mut h = Harness::new(None);
    let config = h.config.clone();
    let target = h.playing().player.position - Vec2::new(0.0, 150.0);
    let id = h
        .playing()
        .field
        .spawn_meteor(still_meteor(MeteorSize::Large, target), &config);

    h.tick(ActionInput::default().with_pressed(Action::Fire));
    for _ in 0..30 {
        if h.playing().score > 0 {
            break;
        }
        h.tick(ActionInput::default());
    }

    let scene = h.playing();
    assert_eq!(scene.score, config.large_meteor_points);
    assert!(scene.field.meteors.get(id).is_none_or(|m| !m.is_active()));
    let small = scene
        .field
        .meteors
        .values()
        .filter(|m| m.size == MeteorSize::Small)
        .count();
    assert!(small <= config.max_fragments as usize);
}

#[test]
fn restart_resets_everything_but_high_score() {
    let mut h = Harness::new(Some(3));
    h.playing().player.lives = 1;
    h.playing().score = 8;
    h.meteor_on_ship();
    assert_eq!(h.run_until_change(240), SceneKind::GameOver);

    h.tick(ActionInput::default().with_pressed(Action::Restart));
    assert_eq!(h.game.kind(), SceneKind::Playing);
    let config = h.config.clone();
    let scene = h.playing();
    assert_eq!(scene.score, 0);
    assert_eq!(scene.level(), 1);
    assert_eq!(scene.player.lives, config.starting_lives);
    assert_eq!(scene.player.shields, config.starting_shields);
    assert_eq!(h.game.high_score().stored(), 8);
}

#[test]
fn quit_ends_the_game_from_any_scene() {
    let mut h = Harness::new(None);
    let quit = ActionInput::default().with_pressed(Action::Quit);
    assert_eq!(h.tick(quit), TickOutcome::Quit);

    let target = h.playing().director.meteor_target;
    h.playing().director.meteors_spawned = target;
    assert_eq!(h.run_until_change(1), SceneKind::LevelTransition);
    assert_eq!(h.tick(quit), TickOutcome::Quit);
}

#[test]
fn missing_or_malformed_high_score_counts_as_zero() {
    let h = Harness::new(None);
    assert_eq!(h.game.high_score().stored(), 0);

    let dir = std::env::temp_dir().join(format!("asteroids-scenario-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("highscore.txt");
    std::fs::write(&path, "not a number").expect("write fixture");
    let store = FileHighScoreStore::new(&path);
    assert!(store.load().is_err());

    let config = GameConfig::default();
    let game = Game::new(&config, Box::new(store), GameRng::seed_from_u64(1));
    assert_eq!(game.high_score().stored(), 0);
    let _ = std::fs::remove_dir_all(&dir);
}
