//! Player module: ship state and the per-tick rules that drive it.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `Player` record, `BurstFire`, `Drift`, `LifeState` (explosion animation) |
//! | [`control`] | Turning, thrust ramp + drift, reverse thrusters, shield activation, burst fire, hyperspace |
//!
//! All public items are re-exported at this level so that the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module
//! layout.

pub mod control;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use control::{
    drive, fire, steer, try_hyperspace, update_player, update_shield, HyperspaceOutcome,
};
pub use state::{BurstFire, Drift, LifeState, Player, PLAYER_OWNER};
