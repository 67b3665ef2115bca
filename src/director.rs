//! Spawning and pacing.
//!
//! The [`Director`] owns every level-wide timer: meteor spawns and their
//! gradual speed-up, alien arrivals and volleys, the heartbeat, and the
//! periodic sweep that reaps exploded entities.  A fresh director is built for
//! every level (and every respawn), so nothing carries over between them.

use crate::alien::entry_seed;
use crate::audio::{play_once, restart, SoundCue, SoundSink};
use crate::config::GameConfig;
use crate::meteor::ring_seed;
use crate::timer::Countdown;
use crate::world::{Lifecycle, Playfield, Tick};
use bevy::log::debug;
use bevy::math::Vec2;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Director {
    pub level: u32,
    /// Base speed of newly spawned meteors (px/s); rises over the level.
    pub base_meteor_speed: f32,
    /// Large meteors spawned so far this level.
    pub meteors_spawned: u32,
    /// Large meteors to spawn (and clear) this level.
    pub meteor_target: u32,
    meteor_spawn: Countdown,
    speed_up: Countdown,
    alien_spawn: Countdown,
    alien_attack: Countdown,
    beat: Countdown,
    beat_interval: f32,
    beat_one_next: bool,
    cleanup: Countdown,
}

impl Director {
    pub fn new(level: u32, config: &GameConfig) -> Self {
        Self {
            level,
            base_meteor_speed: config.base_meteor_speed,
            meteors_spawned: 0,
            meteor_target: config.meteors_for_level(level),
            meteor_spawn: Countdown::new(config.meteor_spawn_interval),
            speed_up: Countdown::new(config.meteor_speed_up_interval),
            alien_spawn: Countdown::new(config.alien_spawn_interval),
            alien_attack: Countdown::new(config.alien_attack_interval),
            beat: Countdown::new(config.beat_initial_delay),
            beat_interval: config.beat_start_interval,
            beat_one_next: true,
            cleanup: Countdown::new(config.cleanup_interval),
        }
    }

    /// Spawns one large meteor on the entry ring when the spawn timer fires,
    /// the level quota is not used up and fewer than `meteor_target` meteors
    /// are alive.  Returns the new meteor id.
    pub fn spawn_meteors(&mut self, field: &mut Playfield, tick: &mut Tick<'_>) -> Option<u32> {
        self.meteor_spawn.update(tick.dt);
        if !self.meteor_spawn.is_ready() {
            return None;
        }
        self.meteor_spawn.reset();
        let target = self.meteor_target as usize;
        if field.meteors.len() >= target || self.meteors_spawned >= self.meteor_target {
            return None;
        }
        let seed = ring_seed(self.base_meteor_speed, tick.config, tick.rng);
        self.meteors_spawned += 1;
        Some(field.spawn_meteor(seed, tick.config))
    }

    /// Raises the base meteor speed on every speed-up tick.  Meteors already
    /// in flight keep their speed.
    pub fn speed_up_meteors(&mut self, dt: f32, config: &GameConfig) {
        self.speed_up.update(dt);
        if self.speed_up.is_ready() {
            self.speed_up.reset();
            self.base_meteor_speed += config.meteor_speed_up_amount;
        }
    }

    /// Rolls for a new alien on every spawn tick while there is room.
    pub fn spawn_aliens(&mut self, field: &mut Playfield, tick: &mut Tick<'_>) -> Option<u32> {
        self.alien_spawn.update(tick.dt);
        if !self.alien_spawn.is_ready() {
            return None;
        }
        self.alien_spawn.reset();
        if field.active_alien_count() >= tick.config.max_aliens {
            return None;
        }
        if !tick.rng.gen_bool(tick.config.alien_spawn_chance) {
            return None;
        }
        let seed = entry_seed(tick.config, tick.rng);
        let id = field.spawn_alien(seed, tick.config);
        debug!("alien {} enters at {:?} (intelligent: {})", id, seed.position, seed.intelligent);
        Some(id)
    }

    /// Every attack tick, each flying alien fires one laser.  The attack
    /// timer only runs while aliens are present.  Returns the shots fired.
    pub fn alien_attack(&mut self, field: &mut Playfield, target: Vec2, tick: &mut Tick<'_>) -> usize {
        if field.active_alien_count() == 0 {
            return 0;
        }
        self.alien_attack.update(tick.dt);
        if !self.alien_attack.is_ready() {
            return 0;
        }
        self.alien_attack.reset();

        let mut shots = 0;
        for alien_id in field.aliens.ids() {
            let Some((rotation, muzzle)) = field
                .aliens
                .get(alien_id)
                .filter(|a| a.lifecycle == Lifecycle::Active)
                .map(|a| {
                    let rotation = a.aim(target, tick.rng);
                    (rotation, a.muzzle(rotation, tick.config))
                })
            else {
                continue;
            };
            let laser = field.spawn_alien_laser(alien_id, muzzle, rotation, tick.config);
            if let Some(alien) = field.aliens.get_mut(alien_id) {
                alien.last_shot = Some(laser);
            }
            shots += 1;
        }
        if shots > 0 {
            play_once(tick.audio, SoundCue::AlienLaser);
        }
        shots
    }

    /// Keeps the alien engine hum going exactly while aliens are flying.
    pub fn alien_engine(&self, field: &Playfield, audio: &mut dyn SoundSink) {
        if field.active_alien_count() > 0 {
            play_once(audio, SoundCue::AlienEngine);
        } else {
            audio.pause(SoundCue::AlienEngine);
        }
    }

    /// Alternates the two heartbeat cues, each beat a little sooner than the
    /// last down to the configured floor.  Returns the cue played this tick.
    pub fn beat(&mut self, tick: &mut Tick<'_>) -> Option<SoundCue> {
        self.beat.update(tick.dt);
        if !self.beat.is_ready() {
            return None;
        }
        let cue = if self.beat_one_next {
            SoundCue::BeatOne
        } else {
            SoundCue::BeatTwo
        };
        self.beat_one_next = !self.beat_one_next;
        restart(tick.audio, cue);
        self.beat.set_duration(self.beat_interval);
        self.beat_interval =
            (self.beat_interval - tick.config.beat_step).max(tick.config.beat_min_interval);
        Some(cue)
    }

    /// Current heartbeat period (s).
    pub fn beat_interval(&self) -> f32 {
        self.beat.duration()
    }

    /// Periodically reaps exploded meteors and aliens.
    pub fn cleanup(&mut self, field: &mut Playfield, dt: f32) -> usize {
        self.cleanup.update(dt);
        if !self.cleanup.is_ready() {
            return 0;
        }
        self.cleanup.reset();
        field.reap_exploded()
    }

    /// The quota is spawned and every meteor (including fragments and
    /// explosions not yet reaped) is gone.
    pub fn level_cleared(&self, field: &Playfield) -> bool {
        self.meteors_spawned >= self.meteor_target && field.meteors.is_empty()
    }
}
