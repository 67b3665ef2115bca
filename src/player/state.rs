//! Player ship state.
//!
//! Everything the ship carries between ticks lives on [`Player`]: the thrust
//! ramp, the burst-fire counter, resource counts and the shield, drift and
//! hyperspace timers.  The per-tick rules that mutate it are in
//! [`super::control`].

use crate::config::GameConfig;
use crate::render::{RenderItem, Visual};
use crate::spatial_partition::{Category, Hitbox, ShapeId, SpatialIndex};
use crate::timer::Countdown;
use bevy::math::Vec2;

/// Owner id reported by the ship's shape.
pub const PLAYER_OWNER: u32 = 0;

/// Where the ship is in its life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifeState {
    Alive,
    /// Playing the explosion animation; controls are ignored.
    Dying { frame: u32, frame_timer: Countdown },
    /// Animation finished; the scene will take a life and move on.
    Dead,
}

/// Coasting after thrust is released.
///
/// Speed falls linearly from `initial_speed` to zero while the timer runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Rotation at the moment thrust was released.
    pub heading: f32,
    pub initial_speed: f32,
    pub timer: Countdown,
}

impl Drift {
    pub fn speed(&self) -> f32 {
        self.initial_speed * self.timer.fraction_remaining()
    }
}

/// Two nested cooldowns: a short one between shots and a longer one after a
/// full burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstFire {
    shots_in_burst: u32,
    shot_cooldown: Countdown,
    burst_cooldown: Countdown,
}

impl BurstFire {
    /// Both cooldowns start elapsed so the first shot is immediate.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            shots_in_burst: 0,
            shot_cooldown: Countdown::ready(config.shoot_cooldown),
            burst_cooldown: Countdown::ready(config.burst_cooldown),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.shot_cooldown.update(dt);
        self.burst_cooldown.update(dt);
    }

    /// Pulls the trigger.  Returns the 1-based shot number within the burst
    /// when a laser should be fired.
    ///
    /// Once `max_shots` shots were fired, the next trigger pull that gets past
    /// the shot cooldown starts the burst cooldown instead and clears the
    /// counter, so the counter never exceeds `max_shots`.
    pub fn try_fire(&mut self, trigger_held: bool, max_shots: u32) -> Option<u32> {
        if !trigger_held || !self.burst_cooldown.is_ready() || !self.shot_cooldown.is_ready() {
            return None;
        }
        self.shot_cooldown.reset();
        if self.shots_in_burst < max_shots {
            self.shots_in_burst += 1;
            Some(self.shots_in_burst)
        } else {
            self.burst_cooldown.reset();
            self.shots_in_burst = 0;
            None
        }
    }

    pub fn shots_in_burst(&self) -> u32 {
        self.shots_in_burst
    }
}

/// The player's ship.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub rotation: f32,
    pub shape: ShapeId,
    /// Current forward speed (px/s).
    pub speed: f32,
    /// Speed the thrust ramp has built up; cleared when thrust is released.
    pub thrust_ramp: f32,
    pub lives: u32,
    pub shields: u32,
    pub drift: Option<Drift>,
    /// Running while the shield is up.
    pub shield_timer: Option<Countdown>,
    /// Running after a jump; absent before the first one.
    pub hyperspace_cooldown: Option<Countdown>,
    pub burst: BurstFire,
    pub life: LifeState,
}

impl Player {
    pub fn register(
        position: Vec2,
        lives: u32,
        shields: u32,
        space: &mut SpatialIndex,
        config: &GameConfig,
    ) -> Self {
        let shape = space.add(
            Hitbox::Circle {
                radius: config.player_radius,
            },
            Category::Player,
            PLAYER_OWNER,
            position,
        );
        Self {
            position,
            rotation: 0.0,
            shape,
            speed: 0.0,
            thrust_ramp: 0.0,
            lives,
            shields,
            drift: None,
            shield_timer: None,
            hyperspace_cooldown: None,
            burst: BurstFire::new(config),
            life: LifeState::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.life, LifeState::Dying { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.life == LifeState::Dead
    }

    pub fn is_shielded(&self) -> bool {
        self.shield_timer.is_some()
    }

    pub fn hyperspace_available(&self) -> bool {
        self.hyperspace_cooldown.is_none_or(|cooldown| cooldown.is_ready())
    }

    /// Starts the explosion animation.  No-op unless alive.
    pub fn begin_dying(&mut self, config: &GameConfig) {
        if self.is_alive() {
            self.life = LifeState::Dying {
                frame: 0,
                frame_timer: Countdown::new(config.dying_frame_duration),
            };
            self.drift = None;
            self.speed = 0.0;
            self.thrust_ramp = 0.0;
        }
    }

    /// Advances the explosion animation; returns `true` once it has finished.
    pub fn advance_dying(&mut self, dt: f32, config: &GameConfig) -> bool {
        if let LifeState::Dying {
            mut frame,
            mut frame_timer,
        } = self.life
        {
            frame_timer.update(dt);
            if frame_timer.is_ready() {
                frame_timer.reset();
                frame += 1;
            }
            self.life = if frame >= config.dying_frames {
                LifeState::Dead
            } else {
                LifeState::Dying { frame, frame_timer }
            };
        }
        self.is_dead()
    }

    pub fn render_item(&self) -> Option<RenderItem> {
        let visual = match self.life {
            LifeState::Alive => Visual::Ship,
            LifeState::Dying { frame, .. } => Visual::ShipExplosion { frame },
            LifeState::Dead => return None,
        };
        Some(RenderItem::new(self.position, self.rotation, visual))
    }
}
