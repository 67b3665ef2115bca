//! Rendering collaborator, simulation side.
//!
//! Scenes describe what is on screen as a stream of [`RenderItem`]s, drawn in
//! order (later items on top).  A [`Canvas`] decides how each [`Visual`]
//! looks; the game's canvas draws gizmo outlines (see [`crate::rendering`]).

use bevy::math::Vec2;

/// Which sprite to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    Ship,
    /// Ship explosion animation, frame index from 0.
    ShipExplosion { frame: u32 },
    Exhaust,
    Shield,
    MeteorLarge { variant: u8 },
    MeteorSmall { variant: u8 },
    /// Meteor that was hit and is waiting to be reaped.
    Explosion { radius: f32 },
    Laser,
    AlienLaser,
    Alien { intelligent: bool },
    Star { radius: f32, brightness: f32 },
    LifeIndicator,
    ShieldIndicator,
    HyperspaceIndicator,
}

/// One sprite placement in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub position: Vec2,
    pub rotation: f32,
    pub visual: Visual,
}

impl RenderItem {
    pub fn new(position: Vec2, rotation: f32, visual: Visual) -> Self {
        Self {
            position,
            rotation,
            visual,
        }
    }
}

/// Draw target.
pub trait Canvas {
    fn draw(&mut self, item: &RenderItem);
}

/// Canvas that keeps every item; used by headless runs and tests.
impl Canvas for Vec<RenderItem> {
    fn draw(&mut self, item: &RenderItem) {
        self.push(*item);
    }
}
