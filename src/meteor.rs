//! Meteors: spawning on the entry ring, drifting, breaking apart.
//!
//! New large meteors appear on a ring around the screen centre, just outside
//! the visible area, and fly straight at the centre.  They only start wrapping
//! around the screen edges once they have actually entered the screen;
//! otherwise the wrap would teleport them in from the opposite edge.
//!
//! A large meteor shot by the player breaks into up to
//! [`GameConfig::max_fragments`] small meteors scattered around it.

use crate::config::GameConfig;
use crate::constants::METEOR_SPRITE_VARIANTS;
use crate::geometry::{direction_or, is_on_screen, wrap_position, DEFAULT_HEADING};
use crate::render::{RenderItem, Visual};
use crate::spatial_partition::{Category, Hitbox, ShapeId, SpatialIndex};
use crate::world::{GameRng, Lifecycle};
use bevy::math::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorSize {
    Large,
    Small,
}

impl MeteorSize {
    pub fn radius(self, config: &GameConfig) -> f32 {
        match self {
            MeteorSize::Large => config.large_meteor_radius,
            MeteorSize::Small => config.small_meteor_radius,
        }
    }

    pub fn category(self) -> Category {
        match self {
            MeteorSize::Large => Category::MeteorLarge,
            MeteorSize::Small => Category::MeteorSmall,
        }
    }

    /// Score for destroying a meteor of this size.
    pub fn points(self, config: &GameConfig) -> u32 {
        match self {
            MeteorSize::Large => config.large_meteor_points,
            MeteorSize::Small => config.small_meteor_points,
        }
    }
}

/// Everything needed to spawn a meteor, before it has a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteorSeed {
    pub size: MeteorSize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    /// Angular velocity (rad/s).
    pub spin: f32,
    pub variant: u8,
    /// Whether the meteor starts inside the screen (and so wraps at once).
    pub entered: bool,
}

#[derive(Debug, Clone)]
pub struct Meteor {
    pub size: MeteorSize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub spin: f32,
    pub variant: u8,
    pub shape: ShapeId,
    pub lifecycle: Lifecycle,
    pub entered: bool,
}

impl Meteor {
    /// Registers the seed's shape under `id` and builds the record.
    pub fn register(seed: MeteorSeed, id: u32, space: &mut SpatialIndex, config: &GameConfig) -> Self {
        let shape = space.add(
            Hitbox::Circle {
                radius: seed.size.radius(config),
            },
            seed.size.category(),
            id,
            seed.position,
        );
        Self {
            size: seed.size,
            position: seed.position,
            velocity: seed.velocity,
            rotation: seed.rotation,
            spin: seed.spin,
            variant: seed.variant,
            shape,
            lifecycle: Lifecycle::Active,
            entered: seed.entered,
        }
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Moves and spins the meteor.  Exploding meteors stay where they were hit.
    pub fn update(&mut self, dt: f32, space: &mut SpatialIndex, config: &GameConfig) {
        if !self.is_active() {
            return;
        }
        let size = config.screen_size();
        self.position += self.velocity * dt;
        self.rotation += self.spin * dt;
        if self.entered {
            self.position = wrap_position(self.position, size);
        } else if is_on_screen(self.position, size) {
            self.entered = true;
        }
        space.set_position(self.shape, self.position);
    }

    /// Takes the meteor out of play: its shape leaves the index now, the
    /// record stays (showing the explosion) until the next cleanup pass.
    pub fn explode(&mut self, space: &mut SpatialIndex) {
        space.remove(self.shape);
        self.lifecycle = Lifecycle::Exploding;
    }

    /// Sends the meteor straight away from `center` at `speed`, as when it
    /// bounces off the player's shield.
    pub fn deflect_from(&mut self, center: Vec2, speed: f32) {
        self.velocity = direction_or(self.position - center, DEFAULT_HEADING) * speed;
    }

    pub fn render_item(&self, config: &GameConfig) -> RenderItem {
        let visual = match (self.lifecycle, self.size) {
            (Lifecycle::Exploding, size) => Visual::Explosion {
                radius: size.radius(config),
            },
            (Lifecycle::Active, MeteorSize::Large) => Visual::MeteorLarge {
                variant: self.variant,
            },
            (Lifecycle::Active, MeteorSize::Small) => Visual::MeteorSmall {
                variant: self.variant,
            },
        };
        RenderItem::new(self.position, self.rotation, visual)
    }
}

fn random_speed(base_speed: f32, config: &GameConfig, rng: &mut GameRng) -> f32 {
    base_speed + rng.gen::<f32>() * config.meteor_speed_jitter
}

fn random_spin(config: &GameConfig, rng: &mut GameRng) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0) * config.meteor_max_spin
}

/// A large meteor on the entry ring, aimed at the screen centre.
pub fn ring_seed(base_speed: f32, config: &GameConfig, rng: &mut GameRng) -> MeteorSeed {
    let center = config.screen_center();
    let angle = rng.gen::<f32>() * TAU;
    let position = center + Vec2::from_angle(angle) * config.meteor_spawn_ring_radius();
    let direction = direction_or(center - position, DEFAULT_HEADING);
    MeteorSeed {
        size: MeteorSize::Large,
        position,
        velocity: direction * random_speed(base_speed, config, rng),
        rotation: rng.gen::<f32>() * TAU,
        spin: random_spin(config, rng),
        variant: rng.gen_range(0..METEOR_SPRITE_VARIANTS),
        entered: false,
    }
}

/// Small meteors left behind by a large one destroyed at `parent`.
///
/// Produces between 0 and `max_fragments` seeds.  Each is offset from the
/// parent by a magnitude in `[fragment_scatter_min, fragment_scatter_max)` on
/// both axes, with an independent random sign per axis.
pub fn fragment_seeds(
    parent: Vec2,
    base_speed: f32,
    config: &GameConfig,
    rng: &mut GameRng,
) -> Vec<MeteorSeed> {
    let count = rng.gen_range(0..=config.max_fragments);
    let span = config.fragment_scatter_max - config.fragment_scatter_min;
    (0..count)
        .map(|_| {
            let mut scatter = || {
                let magnitude = config.fragment_scatter_min + rng.gen::<f32>() * span;
                if rng.gen_bool(0.5) {
                    magnitude
                } else {
                    -magnitude
                }
            };
            let offset = Vec2::new(scatter(), scatter());
            let heading = Vec2::from_angle(rng.gen::<f32>() * TAU);
            MeteorSeed {
                size: MeteorSize::Small,
                position: parent + offset,
                velocity: heading * random_speed(base_speed, config, rng),
                rotation: rng.gen::<f32>() * TAU,
                spin: random_spin(config, rng),
                variant: rng.gen_range(0..METEOR_SPRITE_VARIANTS),
                entered: true,
            }
        })
        .collect()
}
