//! Entity storage for a running scene.
//!
//! A [`Playfield`] owns every collidable entity of a scene in typed
//! [`EntityStore`]s plus the [`SpatialIndex`] their shapes live in.  All
//! spawn and despawn paths go through the playfield so a shape is never left
//! behind in the index after its record is gone.
//!
//! [`Tick`] bundles what every update step needs: the fixed `dt`, this tick's
//! input, the configuration, the audio sink and the random source.

use crate::alien::{Alien, AlienSeed};
use crate::audio::SoundSink;
use crate::config::GameConfig;
use crate::input::ActionInput;
use crate::meteor::{Meteor, MeteorSeed};
use crate::projectile::{Projectile, Shooter};
use crate::spatial_partition::SpatialIndex;
use bevy::math::Vec2;
use rand::rngs::StdRng;
use std::collections::BTreeMap;

/// Random source used by the simulation.  Seed it for reproducible runs.
pub type GameRng = StdRng;

/// Per-tick context handed to every update step.
pub struct Tick<'a> {
    /// Fixed step length (s).
    pub dt: f32,
    pub input: &'a ActionInput,
    pub config: &'a GameConfig,
    pub audio: &'a mut dyn SoundSink,
    pub rng: &'a mut GameRng,
}

/// Whether a destructible entity is still in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    /// Hit this tick or earlier; no longer collidable, reaped by the cleanup
    /// pass.
    Exploding,
}

/// Insertion-ordered map from entity id to record.
///
/// Ids increase monotonically and are never reused within a store, so an id
/// held by another entity (an alien's last shot, say) can go stale but never
/// points at the wrong record.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    next_id: u32,
    items: BTreeMap<u32, T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            items: BTreeMap::new(),
        }
    }
}

impl<T> EntityStore<T> {
    /// Id the next inserted record will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn insert(&mut self, item: T) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.insert(id, item);
        id
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    pub fn remove(&mut self, id: u32) -> Option<T> {
        self.items.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of the current ids, in insertion order.
    pub fn ids(&self) -> Vec<u32> {
        self.items.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.items.iter().map(|(&id, item)| (id, item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut T)> {
        self.items.iter_mut().map(|(&id, item)| (id, item))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Removes every record matching `remove` and returns them in id order.
    pub fn drain_where(&mut self, mut remove: impl FnMut(&T) -> bool) -> Vec<T> {
        let doomed: Vec<u32> = self
            .items
            .iter()
            .filter(|&(_, item)| remove(item))
            .map(|(&id, _)| id)
            .collect();
        doomed
            .into_iter()
            .filter_map(|id| self.items.remove(&id))
            .collect()
    }
}

/// Every collidable entity of a scene and the index their shapes live in.
#[derive(Debug, Clone)]
pub struct Playfield {
    pub space: SpatialIndex,
    pub meteors: EntityStore<Meteor>,
    pub lasers: EntityStore<Projectile>,
    pub alien_lasers: EntityStore<Projectile>,
    pub aliens: EntityStore<Alien>,
}

impl Playfield {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            space: SpatialIndex::new(config.grid_cell_size),
            meteors: EntityStore::default(),
            lasers: EntityStore::default(),
            alien_lasers: EntityStore::default(),
            aliens: EntityStore::default(),
        }
    }

    pub fn spawn_meteor(&mut self, seed: MeteorSeed, config: &GameConfig) -> u32 {
        let id = self.meteors.next_id();
        let meteor = Meteor::register(seed, id, &mut self.space, config);
        self.meteors.insert(meteor)
    }

    /// Spawns a player laser.
    pub fn spawn_laser(&mut self, position: Vec2, rotation: f32, config: &GameConfig) -> u32 {
        let id = self.lasers.next_id();
        let laser = Projectile::register(
            Shooter::Player,
            position,
            rotation,
            config.laser_speed,
            id,
            &mut self.space,
            config,
        );
        self.lasers.insert(laser)
    }

    /// Spawns a laser fired by the alien with id `alien`.
    pub fn spawn_alien_laser(
        &mut self,
        alien: u32,
        position: Vec2,
        rotation: f32,
        config: &GameConfig,
    ) -> u32 {
        let id = self.alien_lasers.next_id();
        let laser = Projectile::register(
            Shooter::Alien(alien),
            position,
            rotation,
            config.alien_laser_speed,
            id,
            &mut self.space,
            config,
        );
        self.alien_lasers.insert(laser)
    }

    pub fn spawn_alien(&mut self, seed: AlienSeed, config: &GameConfig) -> u32 {
        let id = self.aliens.next_id();
        let alien = Alien::register(seed, id, &mut self.space, config);
        self.aliens.insert(alien)
    }

    pub fn despawn_laser(&mut self, id: u32) {
        if let Some(laser) = self.lasers.remove(id) {
            self.space.remove(laser.shape);
        }
    }

    pub fn despawn_alien_laser(&mut self, id: u32) {
        if let Some(laser) = self.alien_lasers.remove(id) {
            self.space.remove(laser.shape);
        }
    }

    /// Moves every entity one step: aliens, alien lasers, meteors, then
    /// player lasers.
    pub fn advance(&mut self, dt: f32, config: &GameConfig) {
        for (_, alien) in self.aliens.iter_mut() {
            alien.update(dt, &mut self.space);
        }
        for (_, laser) in self.alien_lasers.iter_mut() {
            laser.update(dt, &mut self.space);
        }
        for (_, meteor) in self.meteors.iter_mut() {
            meteor.update(dt, &mut self.space, config);
        }
        for (_, laser) in self.lasers.iter_mut() {
            laser.update(dt, &mut self.space);
        }
    }

    /// Removes exploded meteors and aliens whose shapes already left the
    /// index.  Returns how many records were reaped.
    pub fn reap_exploded(&mut self) -> usize {
        let meteors = self
            .meteors
            .drain_where(|m| m.lifecycle == Lifecycle::Exploding);
        let aliens = self
            .aliens
            .drain_where(|a| a.lifecycle == Lifecycle::Exploding);
        for meteor in &meteors {
            self.space.remove(meteor.shape);
        }
        for alien in &aliens {
            self.space.remove(alien.shape);
        }
        meteors.len() + aliens.len()
    }

    /// Drops lasers and aliens that travelled past the off-screen margin.
    pub fn remove_offscreen(&mut self, config: &GameConfig) {
        let size = config.screen_size();
        let margin = config.offscreen_margin;
        for laser in self.lasers.drain_where(|l| l.is_beyond(size, margin)) {
            self.space.remove(laser.shape);
        }
        for laser in self.alien_lasers.drain_where(|l| l.is_beyond(size, margin)) {
            self.space.remove(laser.shape);
        }
        for alien in self.aliens.drain_where(|a| a.is_beyond(size, margin)) {
            self.space.remove(alien.shape);
        }
    }

    /// Number of aliens still flying (exploding ones excluded).
    pub fn active_alien_count(&self) -> usize {
        self.aliens
            .values()
            .filter(|a| a.lifecycle == Lifecycle::Active)
            .count()
    }
}
