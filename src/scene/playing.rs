//! The in-game scene.
//!
//! One `update` call is one fixed tick:
//!
//! 1. player rules (steer, drive, shield, fire, hyperspace) and the shield
//!    bubble snapping onto the ship
//! 2. the dying animation; once it finishes a life is taken and the scene
//!    ends with [`Transition::Respawn`] or [`Transition::GameOver`]
//! 3. director spawns (meteors, aliens)
//! 4. movement of every entity, alien volleys and engine hum, meteor speed-up
//! 5. collision resolution and scoring
//! 6. cleanup sweep and heartbeat
//! 7. the level-cleared check, then off-screen removal

use super::{Carryover, Transition};
use crate::combat::resolve_collisions;
use crate::config::GameConfig;
use crate::director::Director;
use crate::effects::{
    hyperspace_indicator, life_indicators, shield_indicators, Exhaust, Shield, Star,
};
use crate::player::{update_player, Player};
use crate::render::Canvas;
use crate::world::{Playfield, Tick};
use bevy::log::{debug, info};

pub struct PlayingScene {
    pub field: Playfield,
    pub player: Player,
    pub shield: Option<Shield>,
    pub exhaust: Option<Exhaust>,
    pub stars: Vec<Star>,
    pub director: Director,
    pub score: u32,
}

impl PlayingScene {
    /// Starts (or restarts) a level with the ship at screen center.
    pub fn new(carryover: Carryover, config: &GameConfig) -> Self {
        let mut field = Playfield::new(config);
        let player = Player::register(
            config.screen_center(),
            carryover.lives,
            carryover.shields,
            &mut field.space,
            config,
        );
        info!(
            "Level {} starts: {} lives, {} shields, score {}",
            carryover.level, carryover.lives, carryover.shields, carryover.score
        );
        Self {
            field,
            player,
            shield: None,
            exhaust: None,
            stars: carryover.stars,
            director: Director::new(carryover.level, config),
            score: carryover.score,
        }
    }

    pub fn level(&self) -> u32 {
        self.director.level
    }

    pub fn update(&mut self, tick: &mut Tick<'_>) -> Option<Transition> {
        update_player(
            &mut self.player,
            &mut self.field,
            &mut self.shield,
            &mut self.exhaust,
            tick,
        );
        if let Some(shield) = self.shield.as_mut() {
            shield.follow(self.player.position, self.player.rotation, &mut self.field.space);
        }

        if self.player.is_dying() && self.player.advance_dying(tick.dt, tick.config) {
            return Some(self.life_lost());
        }

        self.director.spawn_meteors(&mut self.field, tick);
        self.director.spawn_aliens(&mut self.field, tick);

        self.field.advance(tick.dt, tick.config);
        self.director
            .alien_attack(&mut self.field, self.player.position, tick);
        self.director.alien_engine(&self.field, tick.audio);
        self.director.speed_up_meteors(tick.dt, tick.config);

        let report = resolve_collisions(
            &mut self.field,
            &mut self.player,
            self.director.base_meteor_speed,
            tick,
        );
        self.score += report.points;
        if report.player_hit {
            debug!("ship destroyed at {:?}", self.player.position);
        }

        self.director.cleanup(&mut self.field, tick.dt);
        self.director.beat(tick);

        // A ship caught in its explosion still pays for the hit first.
        if self.player.is_alive() && self.director.level_cleared(&self.field) {
            let carryover = next_level(self.carryover(), tick.config);
            info!("Level {} cleared with score {}", self.level(), self.score);
            return Some(Transition::LevelCleared(carryover));
        }

        self.field.remove_offscreen(tick.config);
        None
    }

    /// Takes one life and decides where the game goes from here.
    fn life_lost(&mut self) -> Transition {
        let lives = self.player.lives.saturating_sub(1);
        if lives == 0 {
            info!("Game over at level {} with score {}", self.level(), self.score);
            return Transition::GameOver {
                score: self.score,
                level: self.level(),
            };
        }
        info!("Life lost, {} left", lives);
        Transition::Respawn(Carryover {
            lives,
            ..self.carryover()
        })
    }

    /// What this scene hands on if it ended right now.
    pub fn carryover(&self) -> Carryover {
        Carryover {
            level: self.level(),
            score: self.score,
            lives: self.player.lives,
            shields: self.player.shields,
            stars: self.stars.clone(),
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas, config: &GameConfig) {
        for star in &self.stars {
            canvas.draw(&star.render_item());
        }
        if let Some(item) = self.player.render_item() {
            canvas.draw(&item);
        }
        if let Some(exhaust) = &self.exhaust {
            canvas.draw(&exhaust.render_item());
        }
        if let Some(shield) = &self.shield {
            canvas.draw(&shield.render_item());
        }
        for meteor in self.field.meteors.values() {
            canvas.draw(&meteor.render_item(config));
        }
        for laser in self.field.lasers.values() {
            canvas.draw(&laser.render_item());
        }
        for item in life_indicators(self.player.lives).chain(shield_indicators(self.player.shields)) {
            canvas.draw(&item);
        }
        if self.player.hyperspace_available() {
            canvas.draw(&hyperspace_indicator());
        }
        for alien in self.field.aliens.values() {
            canvas.draw(&alien.render_item(config));
        }
        for laser in self.field.alien_lasers.values() {
            canvas.draw(&laser.render_item());
        }
    }
}

/// Carryover for the level after `current`: one level up, plus a bonus life
/// on every `bonus_life_every_levels`-th level while below the cap.
pub fn next_level(current: Carryover, config: &GameConfig) -> Carryover {
    let level = current.level + 1;
    let bonus = config.bonus_life_every_levels > 0
        && level % config.bonus_life_every_levels == 0
        && current.lives < config.max_lives;
    Carryover {
        level,
        lives: if bonus { current.lives + 1 } else { current.lives },
        ..current
    }
}
