//! Asteroids: a fixed-tick arcade space shooter.
//!
//! The simulation core (scenes, entities, collisions, pacing) is plain Rust
//! driven one tick at a time through [`game::Game`]; it talks to the outside
//! world only through the [`render::Canvas`], [`audio::SoundSink`],
//! [`save::HighScoreStore`] and [`input::ActionInput`] seams.  The Bevy front
//! end (`simulation`, `rendering`, `menu`, `graphics`) feeds it input on a
//! fixed timestep and draws what it reports.

pub mod alien;
pub mod audio;
pub mod combat;
pub mod config;
pub mod constants;
pub mod director;
pub mod effects;
pub mod error;
pub mod game;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod menu;
pub mod meteor;
pub mod player;
pub mod projectile;
pub mod render;
pub mod rendering;
pub mod save;
pub mod scene;
pub mod score;
pub mod simulation;
pub mod spatial_partition;
pub mod timer;
pub mod world;
