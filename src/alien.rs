//! Alien ships.
//!
//! Aliens enter from the left or right edge and cross the screen at constant
//! speed.  Every attack tick each alien fires one laser: intelligent aliens
//! aim at the player, the others fire in a random direction.

use crate::config::GameConfig;
use crate::geometry::{heading, is_beyond_margin, rotation_towards};
use crate::render::{RenderItem, Visual};
use crate::spatial_partition::{Category, Hitbox, ShapeId, SpatialIndex};
use crate::world::{GameRng, Lifecycle};
use bevy::math::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Spawn parameters for an alien.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlienSeed {
    pub position: Vec2,
    pub velocity: Vec2,
    pub intelligent: bool,
}

#[derive(Debug, Clone)]
pub struct Alien {
    pub position: Vec2,
    pub velocity: Vec2,
    pub intelligent: bool,
    pub shape: ShapeId,
    pub lifecycle: Lifecycle,
    /// Id of the most recent laser this alien fired, if any.
    pub last_shot: Option<u32>,
}

impl Alien {
    pub fn register(seed: AlienSeed, id: u32, space: &mut SpatialIndex, config: &GameConfig) -> Self {
        let shape = space.add(
            Hitbox::Circle {
                radius: config.alien_radius,
            },
            Category::Alien,
            id,
            seed.position,
        );
        Self {
            position: seed.position,
            velocity: seed.velocity,
            intelligent: seed.intelligent,
            shape,
            lifecycle: Lifecycle::Active,
            last_shot: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn update(&mut self, dt: f32, space: &mut SpatialIndex) {
        if !self.is_active() {
            return;
        }
        self.position += self.velocity * dt;
        space.set_position(self.shape, self.position);
    }

    pub fn explode(&mut self, space: &mut SpatialIndex) {
        space.remove(self.shape);
        self.lifecycle = Lifecycle::Exploding;
    }

    /// Direction of the next shot.
    pub fn aim(&self, target: Vec2, rng: &mut GameRng) -> f32 {
        if self.intelligent {
            rotation_towards(self.position, target)
        } else {
            rng.gen::<f32>() * TAU
        }
    }

    /// Where a laser fired along `rotation` appears.
    pub fn muzzle(&self, rotation: f32, config: &GameConfig) -> Vec2 {
        self.position + heading(rotation) * config.alien_radius
    }

    pub fn is_beyond(&self, screen: Vec2, margin: f32) -> bool {
        is_beyond_margin(self.position, screen, margin)
    }

    pub fn render_item(&self, config: &GameConfig) -> RenderItem {
        let visual = match self.lifecycle {
            Lifecycle::Active => Visual::Alien {
                intelligent: self.intelligent,
            },
            Lifecycle::Exploding => Visual::Explosion {
                radius: config.alien_radius,
            },
        };
        RenderItem::new(self.position, 0.0, visual)
    }
}

/// An alien just outside the left or right edge, heading across the screen.
pub fn entry_seed(config: &GameConfig, rng: &mut GameRng) -> AlienSeed {
    let radius = config.alien_radius;
    let from_left = rng.gen_bool(0.5);
    let y = radius + rng.gen::<f32>() * (config.screen_height - 2.0 * radius).max(0.0);
    let x = if from_left {
        -radius
    } else {
        config.screen_width + radius
    };
    let spread = (rng.gen::<f32>() * 2.0 - 1.0) * config.alien_heading_spread;
    let base = if from_left { FRAC_PI_2 } else { -FRAC_PI_2 };
    AlienSeed {
        position: Vec2::new(x, y),
        velocity: heading(base + spread) * config.alien_speed,
        intelligent: rng.gen_bool(config.intelligent_alien_chance),
    }
}
