//! Top-level game driver.
//!
//! [`Game`] owns the active [`Scene`], the high-score record and its store,
//! and the random source.  One [`Game::update`] call is one fixed tick; the
//! Bevy side only feeds it input and drains the audio and render output.

use crate::audio::{SoundCue, SoundSink};
use crate::config::GameConfig;
use crate::input::{Action, ActionInput};
use crate::render::Canvas;
use crate::save::HighScoreStore;
use crate::scene::{next_scene, Scene, SceneKind, Transition};
use crate::score::HighScore;
use crate::world::{GameRng, Tick};
use bevy::log::info;
use bevy::prelude::Resource;

/// Whether the app should keep running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

#[derive(Resource)]
pub struct Game {
    scene: Scene,
    high_score: HighScore,
    store: Box<dyn HighScoreStore + Send + Sync>,
    rng: GameRng,
}

impl Game {
    /// Reads the high score from `store` and starts a new game at level 1.
    pub fn new(
        config: &GameConfig,
        store: Box<dyn HighScoreStore + Send + Sync>,
        mut rng: GameRng,
    ) -> Self {
        let high_score = HighScore::load(store.as_ref());
        let scene = Scene::new_game(config, &mut rng);
        Self {
            scene,
            high_score,
            store,
            rng,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn kind(&self) -> SceneKind {
        self.scene.kind()
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    /// Runs one tick of the active scene and applies any transition it asks for.
    pub fn update(
        &mut self,
        input: &ActionInput,
        audio: &mut dyn SoundSink,
        config: &GameConfig,
        dt: f32,
    ) -> TickOutcome {
        if input.just_pressed(Action::Quit) {
            info!("Quit requested");
            return TickOutcome::Quit;
        }

        let transition = {
            let mut tick = Tick {
                dt,
                input,
                config,
                audio: &mut *audio,
                rng: &mut self.rng,
            };
            self.scene.update(&mut tick)
        };
        self.high_score.observe(self.scene.score());

        if let Some(transition) = transition {
            self.apply_transition(transition, audio, config);
        }
        TickOutcome::Continue
    }

    /// Replaces the active scene.
    ///
    /// On game over the final score is committed to the store (once, and only
    /// if it beats the record) after the game-over scene was built against the
    /// old record.  Looping cues are stopped whenever play stops.
    pub fn apply_transition(
        &mut self,
        transition: Transition,
        audio: &mut dyn SoundSink,
        config: &GameConfig,
    ) {
        let final_score = match transition {
            Transition::GameOver { score, .. } => Some(score),
            _ => None,
        };
        let leaving_play = self.scene.kind() == SceneKind::Playing;

        self.scene = next_scene(transition, &self.high_score, config, &mut self.rng);
        if let Some(score) = final_score {
            self.high_score.commit(score, self.store.as_mut());
        }
        if leaving_play {
            audio.pause(SoundCue::Thrust);
            audio.pause(SoundCue::AlienEngine);
        }
        info!("Scene is now {:?} (level {})", self.scene.kind(), self.scene.level());
    }

    pub fn render(&self, canvas: &mut dyn Canvas, config: &GameConfig) {
        self.scene.render(canvas, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{play_once, CueBoard};
    use crate::save::MemoryHighScoreStore;
    use rand::SeedableRng;

    fn game_with(store: MemoryHighScoreStore) -> (Game, GameConfig) {
        let config = GameConfig::default();
        let game = Game::new(&config, Box::new(store), GameRng::seed_from_u64(21));
        (game, config)
    }

    #[test]
    fn starts_playing_level_one() {
        let (game, _) = game_with(MemoryHighScoreStore::with_score(80));
        assert_eq!(game.kind(), SceneKind::Playing);
        assert_eq!(game.scene().level(), 1);
        assert_eq!(game.high_score().stored(), 80);
    }

    #[test]
    fn quit_works_from_any_scene() {
        let (mut game, config) = game_with(MemoryHighScoreStore::default());
        let mut audio = CueBoard::default();
        let quit = ActionInput::default().with_pressed(Action::Quit);
        assert_eq!(game.update(&quit, &mut audio, &config, 1.0 / 60.0), TickOutcome::Quit);

        game.apply_transition(Transition::GameOver { score: 0, level: 1 }, &mut audio, &config);
        assert_eq!(game.update(&quit, &mut audio, &config, 1.0 / 60.0), TickOutcome::Quit);
    }

    #[test]
    fn game_over_commits_only_a_beaten_record() {
        let store = MemoryHighScoreStore::with_score(10);
        let observer = store.clone();
        let (mut game, config) = game_with(store);
        let mut audio = CueBoard::default();

        game.apply_transition(Transition::GameOver { score: 4, level: 2 }, &mut audio, &config);
        assert!(observer.saves().is_empty());
        assert!(matches!(game.scene(), Scene::GameOver(s) if !s.new_high_score));

        game.apply_transition(Transition::Restart, &mut audio, &config);
        game.apply_transition(Transition::GameOver { score: 25, level: 3 }, &mut audio, &config);
        assert_eq!(observer.saves(), vec![25]);
        assert!(matches!(game.scene(), Scene::GameOver(s) if s.new_high_score));
    }

    #[test]
    fn leaving_play_silences_loops() {
        let (mut game, config) = game_with(MemoryHighScoreStore::default());
        let mut audio = CueBoard::default();
        play_once(&mut audio, SoundCue::AlienEngine);
        game.apply_transition(Transition::GameOver { score: 0, level: 1 }, &mut audio, &config);
        assert!(!audio.is_playing(SoundCue::AlienEngine));
    }
}
