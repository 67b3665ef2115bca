//! Pause between levels: the starfield stays up while the HUD announces the
//! next level, then play resumes.

use super::{Carryover, Transition};
use crate::config::GameConfig;
use crate::render::Canvas;
use crate::timer::Countdown;
use crate::world::Tick;

pub struct LevelStartScene {
    /// Everything the next level starts from; `carryover.level` is the level
    /// being announced.
    pub carryover: Carryover,
    timer: Countdown,
}

impl LevelStartScene {
    pub fn new(carryover: Carryover, config: &GameConfig) -> Self {
        Self {
            carryover,
            timer: Countdown::new(config.level_start_delay),
        }
    }

    pub fn update(&mut self, tick: &mut Tick<'_>) -> Option<Transition> {
        self.timer.update(tick.dt);
        self.timer
            .is_ready()
            .then(|| Transition::BeginLevel(self.carryover.clone()))
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        for star in &self.carryover.stars {
            canvas.draw(&star.render_item());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueBoard;
    use crate::input::ActionInput;
    use crate::world::GameRng;
    use rand::SeedableRng;

    #[test]
    fn begins_level_after_delay() {
        let config = GameConfig::default();
        let mut rng = GameRng::seed_from_u64(3);
        let mut carryover = Carryover::new_game(&config, &mut rng);
        carryover.level = 4;
        let mut scene = LevelStartScene::new(carryover.clone(), &config);
        let mut audio = CueBoard::default();
        let input = ActionInput::default();

        let mut ticks = 0;
        let transition = loop {
            ticks += 1;
            let mut tick = Tick {
                dt: 1.0 / 60.0,
                input: &input,
                config: &config,
                audio: &mut audio,
                rng: &mut rng,
            };
            if let Some(transition) = scene.update(&mut tick) {
                break transition;
            }
            assert!(ticks < 1000);
        };
        assert_eq!(ticks, 120);
        assert_eq!(transition, Transition::BeginLevel(carryover));
    }

    #[test]
    fn renders_only_the_starfield() {
        let config = GameConfig::default();
        let mut rng = GameRng::seed_from_u64(3);
        let scene = LevelStartScene::new(Carryover::new_game(&config, &mut rng), &config);
        let mut items = Vec::new();
        scene.render(&mut items);
        assert_eq!(items.len(), config.star_count);
    }
}
