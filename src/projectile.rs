//! Lasers fired by the player and by aliens.

use crate::config::GameConfig;
use crate::geometry::{heading, is_beyond_margin};
use crate::render::{RenderItem, Visual};
use crate::spatial_partition::{Category, Hitbox, ShapeId, SpatialIndex};
use bevy::math::Vec2;

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shooter {
    Player,
    /// Id of the firing alien in its store.
    Alien(u32),
}

/// A laser travelling in a straight line at constant speed.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub shooter: Shooter,
    pub position: Vec2,
    pub rotation: f32,
    /// Speed along the firing heading (px/s).
    pub speed: f32,
    pub shape: ShapeId,
}

impl Projectile {
    pub fn register(
        shooter: Shooter,
        position: Vec2,
        rotation: f32,
        speed: f32,
        id: u32,
        space: &mut SpatialIndex,
        config: &GameConfig,
    ) -> Self {
        let category = match shooter {
            Shooter::Player => Category::Laser,
            Shooter::Alien(_) => Category::AlienLaser,
        };
        let hitbox = Hitbox::Rect {
            half_size: Vec2::new(config.laser_half_width, config.laser_half_height),
        };
        Self {
            shooter,
            position,
            rotation,
            speed,
            shape: space.add(hitbox, category, id, position),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        heading(self.rotation) * self.speed
    }

    pub fn update(&mut self, dt: f32, space: &mut SpatialIndex) {
        self.position += self.velocity() * dt;
        space.set_position(self.shape, self.position);
    }

    pub fn is_beyond(&self, screen: Vec2, margin: f32) -> bool {
        is_beyond_margin(self.position, screen, margin)
    }

    pub fn render_item(&self) -> RenderItem {
        let visual = match self.shooter {
            Shooter::Player => Visual::Laser,
            Shooter::Alien(_) => Visual::AlienLaser,
        };
        RenderItem::new(self.position, self.rotation, visual)
    }
}
