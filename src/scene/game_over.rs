//! Game-over screen: meteors keep drifting behind the final score until the
//! player asks for a new game.

use super::Transition;
use crate::config::GameConfig;
use crate::effects::{generate_starfield, Star};
use crate::input::Action;
use crate::meteor::ring_seed;
use crate::render::Canvas;
use crate::world::{GameRng, Playfield, Tick};

pub struct GameOverScene {
    pub score: u32,
    /// Level the game ended on.
    pub level: u32,
    /// The final score beat the record stored when the game ended.
    pub new_high_score: bool,
    field: Playfield,
    stars: Vec<Star>,
}

impl GameOverScene {
    pub fn new(
        score: u32,
        level: u32,
        new_high_score: bool,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Self {
        let mut field = Playfield::new(config);
        for _ in 0..config.game_over_meteors {
            let seed = ring_seed(config.base_meteor_speed, config, rng);
            field.spawn_meteor(seed, config);
        }
        Self {
            score,
            level,
            new_high_score,
            field,
            stars: generate_starfield(config, rng),
        }
    }

    pub fn meteor_count(&self) -> usize {
        self.field.meteors.len()
    }

    pub fn update(&mut self, tick: &mut Tick<'_>) -> Option<Transition> {
        if tick.input.just_pressed(Action::Restart) {
            return Some(Transition::Restart);
        }
        self.field.advance(tick.dt, tick.config);
        None
    }

    pub fn render(&self, canvas: &mut dyn Canvas, config: &GameConfig) {
        for star in &self.stars {
            canvas.draw(&star.render_item());
        }
        for meteor in self.field.meteors.values() {
            canvas.draw(&meteor.render_item(config));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueBoard;
    use crate::input::ActionInput;
    use rand::SeedableRng;

    fn tick_with(
        scene: &mut GameOverScene,
        input: ActionInput,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Option<Transition> {
        let mut audio = CueBoard::default();
        let mut tick = Tick {
            dt: 1.0 / 60.0,
            input: &input,
            config,
            audio: &mut audio,
            rng,
        };
        scene.update(&mut tick)
    }

    #[test]
    fn background_meteors_keep_flying() {
        let config = GameConfig::default();
        let mut rng = GameRng::seed_from_u64(11);
        let mut scene = GameOverScene::new(40, 3, true, &config, &mut rng);
        assert_eq!(scene.meteor_count(), config.game_over_meteors);
        for _ in 0..600 {
            assert_eq!(tick_with(&mut scene, ActionInput::default(), &config, &mut rng), None);
        }
        assert_eq!(scene.meteor_count(), config.game_over_meteors);
    }

    #[test]
    fn restart_press_starts_new_game() {
        let config = GameConfig::default();
        let mut rng = GameRng::seed_from_u64(11);
        let mut scene = GameOverScene::new(40, 3, false, &config, &mut rng);
        let held_only = ActionInput::default().with_held(Action::Restart);
        assert_eq!(tick_with(&mut scene, held_only, &config, &mut rng), None);
        let press = ActionInput::default().with_pressed(Action::Restart);
        assert_eq!(
            tick_with(&mut scene, press, &config, &mut rng),
            Some(Transition::Restart)
        );
    }
}
