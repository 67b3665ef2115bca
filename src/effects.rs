//! Cosmetic and attached entities: shield bubble, exhaust plume, starfield,
//! and the HUD resource indicators.

use crate::config::GameConfig;
use crate::geometry::heading;
use crate::render::{RenderItem, Visual};
use crate::spatial_partition::{Category, Hitbox, ShapeId, SpatialIndex};
use crate::world::GameRng;
use bevy::math::Vec2;
use rand::Rng;
use std::f32::consts::PI;

// ── Shield ────────────────────────────────────────────────────────────────────

/// Protective bubble that follows the ship.  At most one exists at a time.
#[derive(Debug, Clone)]
pub struct Shield {
    pub position: Vec2,
    pub rotation: f32,
    pub shape: ShapeId,
}

impl Shield {
    /// The shape reports owner 0; there is only ever one ship.
    pub fn register(position: Vec2, rotation: f32, space: &mut SpatialIndex, config: &GameConfig) -> Self {
        let shape = space.add(
            Hitbox::Circle {
                radius: config.shield_radius,
            },
            Category::Shield,
            0,
            position,
        );
        Self {
            position,
            rotation,
            shape,
        }
    }

    /// Snaps the bubble onto the ship.
    pub fn follow(&mut self, position: Vec2, rotation: f32, space: &mut SpatialIndex) {
        self.position = position;
        self.rotation = rotation;
        space.set_position(self.shape, position);
    }

    pub fn unregister(self, space: &mut SpatialIndex) {
        space.remove(self.shape);
    }

    pub fn render_item(&self) -> RenderItem {
        RenderItem::new(self.position, self.rotation, Visual::Shield)
    }
}

// ── Exhaust ───────────────────────────────────────────────────────────────────

/// Engine plume shown while thrusting or reversing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exhaust {
    pub position: Vec2,
    /// Direction the plume points.
    pub rotation: f32,
}

impl Exhaust {
    /// Plume behind the ship, pointing backwards.
    pub fn behind(ship: Vec2, ship_rotation: f32, config: &GameConfig) -> Self {
        Self {
            position: ship - heading(ship_rotation) * config.exhaust_offset,
            rotation: ship_rotation + PI,
        }
    }

    /// Plume at the nose, pointing forwards (reverse thrusters).
    pub fn at_nose(ship: Vec2, ship_rotation: f32, config: &GameConfig) -> Self {
        Self {
            position: ship + heading(ship_rotation) * config.exhaust_offset,
            rotation: ship_rotation,
        }
    }

    pub fn render_item(&self) -> RenderItem {
        RenderItem::new(self.position, self.rotation, Visual::Exhaust)
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    pub brightness: f32,
}

impl Star {
    pub fn render_item(&self) -> RenderItem {
        RenderItem::new(
            self.position,
            0.0,
            Visual::Star {
                radius: self.radius,
                brightness: self.brightness,
            },
        )
    }
}

/// A fresh random background.
pub fn generate_starfield(config: &GameConfig, rng: &mut GameRng) -> Vec<Star> {
    (0..config.star_count)
        .map(|_| Star {
            position: Vec2::new(
                rng.gen::<f32>() * config.screen_width,
                rng.gen::<f32>() * config.screen_height,
            ),
            radius: rng.gen_range(0.5..1.8),
            brightness: rng.gen_range(0.3..1.0),
        })
        .collect()
}

// ── HUD indicators ────────────────────────────────────────────────────────────

/// One ship icon per remaining life, top-left.
pub fn life_indicators(lives: u32) -> impl Iterator<Item = RenderItem> {
    (0..lives).map(|i| {
        RenderItem::new(
            Vec2::new(20.0 + i as f32 * 50.0, 20.0),
            0.0,
            Visual::LifeIndicator,
        )
    })
}

/// One bubble icon per remaining shield charge, below the lives.
pub fn shield_indicators(shields: u32) -> impl Iterator<Item = RenderItem> {
    (0..shields).map(|i| {
        RenderItem::new(
            Vec2::new(45.0 + i as f32 * 50.0, 60.0),
            0.0,
            Visual::ShieldIndicator,
        )
    })
}

/// Shown while a hyperspace jump is available.
pub fn hyperspace_indicator() -> RenderItem {
    RenderItem::new(Vec2::new(37.0, 95.0), 0.0, Visual::HyperspaceIndicator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn exhaust_sits_behind_ship_and_points_back() {
        let config = GameConfig::default();
        let plume = Exhaust::behind(Vec2::new(100.0, 100.0), 0.0, &config);
        assert!((plume.position - Vec2::new(100.0, 100.0 + config.exhaust_offset)).length() < 1e-3);
        assert!((heading(plume.rotation) - Vec2::new(0.0, 1.0)).length() < 1e-5);

        let reverse = Exhaust::at_nose(Vec2::new(100.0, 100.0), 0.0, &config);
        assert!(reverse.position.y < 100.0);
        assert_eq!(reverse.rotation, 0.0);
    }

    #[test]
    fn starfield_stays_on_screen() {
        let config = GameConfig::default();
        let mut rng = GameRng::seed_from_u64(9);
        let stars = generate_starfield(&config, &mut rng);
        assert_eq!(stars.len(), config.star_count);
        assert!(stars.iter().all(|s| {
            s.position.x < config.screen_width && s.position.y < config.screen_height
        }));
    }

    #[test]
    fn indicators_are_laid_out_in_rows() {
        let lives: Vec<_> = life_indicators(3).collect();
        assert_eq!(lives.len(), 3);
        assert_eq!(lives[2].position, Vec2::new(120.0, 20.0));
        let shields: Vec<_> = shield_indicators(2).collect();
        assert_eq!(shields[1].position, Vec2::new(95.0, 60.0));
    }

    #[test]
    fn shield_follows_ship() {
        let config = GameConfig::default();
        let mut space = SpatialIndex::new(config.grid_cell_size);
        let mut shield = Shield::register(Vec2::ZERO, 0.0, &mut space, &config);
        shield.follow(Vec2::new(300.0, 200.0), 1.0, &mut space);
        assert_eq!(space.get(shield.shape).map(|c| c.position), Some(Vec2::new(300.0, 200.0)));
        shield.unregister(&mut space);
        assert!(space.is_empty());
    }
}
