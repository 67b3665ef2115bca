//! Per-tick player rules.
//!
//! ## Pipeline (runs in order every tick, see [`update_player`])
//!
//! 1. [`steer`]: turn while a turn action is held.
//! 2. [`drive`]: thrust ramp, reverse thrusters, drift after release, exhaust.
//! 3. [`update_shield`]: expire the running shield or raise a new one.
//! 4. [`fire`]: burst-limited laser fire.
//! 5. [`try_hyperspace`]: random safe-spot teleport.
//!
//! Each step takes only the state it touches, so tests can drive a single
//! step with a hand-built [`ActionInput`].

use super::state::{Drift, Player};
use crate::audio::{play_once, SoundCue, SoundSink};
use crate::config::GameConfig;
use crate::effects::{Exhaust, Shield};
use crate::geometry::{heading, wrap_position};
use crate::input::{Action, ActionInput};
use crate::spatial_partition::Hitbox;
use crate::timer::Countdown;
use crate::world::{GameRng, Playfield, Tick};
use bevy::log::{debug, warn};
use bevy::math::Vec2;
use rand::Rng;

/// Result of a hyperspace request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HyperspaceOutcome {
    NotRequested,
    CoolingDown,
    Jumped { to: Vec2 },
    /// Every sampled destination overlapped something; the ship stayed put
    /// and the cooldown was not started.
    NoSafeSpot,
}

/// Runs every player rule for one tick.
///
/// A dying or dead ship ignores input; its exhaust disappears and the thrust
/// sound stops.
pub fn update_player(
    player: &mut Player,
    field: &mut Playfield,
    shield: &mut Option<Shield>,
    exhaust: &mut Option<Exhaust>,
    tick: &mut Tick<'_>,
) -> HyperspaceOutcome {
    let input = *tick.input;
    let config = tick.config;
    let dt = tick.dt;

    if let Some(cooldown) = player.hyperspace_cooldown.as_mut() {
        cooldown.update(dt);
    }
    player.burst.update(dt);

    if !player.is_alive() {
        *exhaust = None;
        tick.audio.pause(SoundCue::Thrust);
        return HyperspaceOutcome::NotRequested;
    }

    steer(player, &input, config, dt);
    drive(player, exhaust, &input, tick.audio, config, dt);
    update_shield(player, field, shield, &input, tick.audio, config, dt);
    fire(player, field, &input, tick.audio, config);
    let outcome = try_hyperspace(player, field, shield.as_ref(), &input, tick.rng, config);

    player.position = wrap_position(player.position, config.screen_size());
    field.space.set_position(player.shape, player.position);
    outcome
}

pub fn steer(player: &mut Player, input: &ActionInput, config: &GameConfig, dt: f32) {
    if input.held(Action::TurnLeft) {
        player.rotation -= config.player_rotation_speed * dt;
    }
    if input.held(Action::TurnRight) {
        player.rotation += config.player_rotation_speed * dt;
    }
}

/// Forward thrust beats reverse when both are held.
pub fn drive(
    player: &mut Player,
    exhaust: &mut Option<Exhaust>,
    input: &ActionInput,
    audio: &mut dyn SoundSink,
    config: &GameConfig,
    dt: f32,
) {
    let thrusting = input.held(Action::Thrust);
    let reversing = input.held(Action::Reverse) && !thrusting;

    if thrusting {
        player.drift = None;
        player.thrust_ramp = (player.speed + config.thrust_ramp_step).min(config.max_thrust_speed);
        player.speed = player.thrust_ramp;
        player.position += heading(player.rotation) * player.speed * dt;
        *exhaust = Some(Exhaust::behind(player.position, player.rotation, config));
        play_once(audio, SoundCue::Thrust);
    } else if input.just_released(Action::Thrust) {
        audio.pause(SoundCue::Thrust);
        player.drift = Some(Drift {
            heading: player.rotation,
            initial_speed: player.speed,
            timer: Countdown::new(config.drift_duration),
        });
        player.thrust_ramp = 0.0;
    }

    if reversing {
        player.drift = None;
        player.speed = 0.0;
        player.position -= heading(player.rotation) * config.reverse_speed * dt;
        *exhaust = Some(Exhaust::at_nose(player.position, player.rotation, config));
        play_once(audio, SoundCue::Thrust);
    } else if input.just_released(Action::Reverse) && !thrusting {
        audio.pause(SoundCue::Thrust);
    }

    if !thrusting && !reversing {
        *exhaust = None;
        if let Some(drift) = player.drift.as_mut() {
            drift.timer.update(dt);
            if drift.timer.is_ready() {
                player.drift = None;
                player.speed = 0.0;
            } else {
                player.speed = drift.speed();
                player.position += heading(drift.heading) * player.speed * dt;
            }
        }
    }
}

/// Keeps the shield bubble and the shield timer in step: the bubble exists
/// exactly while the timer runs.
pub fn update_shield(
    player: &mut Player,
    field: &mut Playfield,
    shield: &mut Option<Shield>,
    input: &ActionInput,
    audio: &mut dyn SoundSink,
    config: &GameConfig,
    dt: f32,
) {
    if let Some(timer) = player.shield_timer.as_mut() {
        timer.update(dt);
        if timer.is_ready() {
            player.shield_timer = None;
            if let Some(bubble) = shield.take() {
                bubble.unregister(&mut field.space);
            }
        }
    } else if input.held(Action::Shield) && player.shields > 0 {
        player.shields -= 1;
        player.shield_timer = Some(Countdown::new(config.shield_duration));
        if let Some(stale) = shield.take() {
            stale.unregister(&mut field.space);
        }
        *shield = Some(Shield::register(
            player.position,
            player.rotation,
            &mut field.space,
            config,
        ));
        play_once(audio, SoundCue::ShieldUp);
    }
}

/// Fires a laser from the nose if the burst rules allow it.  Returns the
/// spawned laser id.
pub fn fire(
    player: &mut Player,
    field: &mut Playfield,
    input: &ActionInput,
    audio: &mut dyn SoundSink,
    config: &GameConfig,
) -> Option<u32> {
    let shot = player
        .burst
        .try_fire(input.held(Action::Fire), config.max_shots_per_burst)?;
    let muzzle = player.position + heading(player.rotation) * config.laser_spawn_offset;
    let id = field.spawn_laser(muzzle, player.rotation, config);
    let cue = match shot {
        1 => SoundCue::LaserOne,
        2 => SoundCue::LaserTwo,
        _ => SoundCue::LaserThree,
    };
    play_once(audio, cue);
    Some(id)
}

/// Teleports the ship to a random spot that overlaps nothing.
///
/// Tries up to `hyperspace_max_attempts` uniformly random on-screen points.
/// The ship's own shape and its shield are ignored when testing a spot.
pub fn try_hyperspace(
    player: &mut Player,
    field: &mut Playfield,
    shield: Option<&Shield>,
    input: &ActionInput,
    rng: &mut GameRng,
    config: &GameConfig,
) -> HyperspaceOutcome {
    if !input.held(Action::Hyperspace) {
        return HyperspaceOutcome::NotRequested;
    }
    if !player.hyperspace_available() {
        return HyperspaceOutcome::CoolingDown;
    }

    let hitbox = Hitbox::Circle {
        radius: config.player_radius,
    };
    let mut ignore = vec![player.shape];
    ignore.extend(shield.map(|s| s.shape));

    for attempt in 0..config.hyperspace_max_attempts {
        let candidate = Vec2::new(
            rng.gen::<f32>() * config.screen_width,
            rng.gen::<f32>() * config.screen_height,
        );
        if !field.space.overlaps_any(&hitbox, candidate, &ignore) {
            debug!("hyperspace jump to {:?} after {} attempts", candidate, attempt + 1);
            player.position = candidate;
            field.space.set_position(player.shape, candidate);
            player.hyperspace_cooldown = Some(Countdown::new(config.hyperspace_cooldown));
            return HyperspaceOutcome::Jumped { to: candidate };
        }
    }

    warn!(
        "hyperspace found no safe spot in {} attempts; staying put",
        config.hyperspace_max_attempts
    );
    HyperspaceOutcome::NoSafeSpot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueBoard;
    use crate::spatial_partition::Category;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (GameConfig, Playfield, Player) {
        let config = GameConfig::default();
        let mut field = Playfield::new(&config);
        let player = Player::register(Vec2::new(640.0, 360.0), 3, 3, &mut field.space, &config);
        (config, field, player)
    }

    #[test]
    fn thrust_ramps_to_cap_then_drifts_to_rest() {
        let (config, _field, mut player) = setup();
        let mut exhaust = None;
        let mut audio = CueBoard::default();
        let hold = ActionInput::default().with_held(Action::Thrust);

        drive(&mut player, &mut exhaust, &hold, &mut audio, &config, DT);
        assert_eq!(player.speed, config.thrust_ramp_step);
        for _ in 0..5 {
            drive(&mut player, &mut exhaust, &hold, &mut audio, &config, DT);
        }
        assert_eq!(player.speed, config.max_thrust_speed);
        assert!(exhaust.is_some());
        assert!(audio.is_playing(SoundCue::Thrust));

        let release = ActionInput::default().with_released(Action::Thrust);
        drive(&mut player, &mut exhaust, &release, &mut audio, &config, DT);
        assert!(exhaust.is_none());
        assert!(!audio.is_playing(SoundCue::Thrust));
        assert!(player.drift.is_some());
        assert!(player.speed < config.max_thrust_speed);

        let idle = ActionInput::default();
        let mut last = player.speed;
        let ticks = (config.drift_duration / DT) as usize + 2;
        for _ in 0..ticks {
            drive(&mut player, &mut exhaust, &idle, &mut audio, &config, DT);
            assert!(player.speed <= last);
            last = player.speed;
        }
        assert!(player.drift.is_none());
        assert_eq!(player.speed, 0.0);
    }

    #[test]
    fn thrust_moves_along_heading() {
        let (config, _field, mut player) = setup();
        let mut exhaust = None;
        let mut audio = CueBoard::default();
        player.rotation = std::f32::consts::FRAC_PI_2;
        let hold = ActionInput::default().with_held(Action::Thrust);
        drive(&mut player, &mut exhaust, &hold, &mut audio, &config, DT);
        assert!(player.position.x > 640.0);
        assert!((player.position.y - 360.0).abs() < 1e-3);
    }

    #[test]
    fn reverse_backs_away_with_nose_exhaust() {
        let (config, _field, mut player) = setup();
        let mut exhaust = None;
        let mut audio = CueBoard::default();
        let hold = ActionInput::default().with_held(Action::Reverse);
        drive(&mut player, &mut exhaust, &hold, &mut audio, &config, DT);
        assert!(player.position.y > 360.0, "rotation 0 faces up; reverse moves down");
        let plume = exhaust.expect("reverse shows exhaust");
        assert!(plume.position.y < player.position.y);
    }

    #[test]
    fn shield_consumes_one_charge_and_expires() {
        let (config, mut field, mut player) = setup();
        let mut shield = None;
        let mut audio = CueBoard::default();
        let hold = ActionInput::default().with_held(Action::Shield);

        update_shield(&mut player, &mut field, &mut shield, &hold, &mut audio, &config, DT);
        assert_eq!(player.shields, 2);
        assert!(shield.is_some() && player.is_shielded());

        // Holding the key while shielded neither stacks nor spends charges.
        for _ in 0..10 {
            update_shield(&mut player, &mut field, &mut shield, &hold, &mut audio, &config, DT);
        }
        assert_eq!(player.shields, 2);
        assert_eq!(field.space.len(), 2, "player + one shield");

        let idle = ActionInput::default();
        let ticks = (config.shield_duration / DT) as usize + 1;
        for _ in 0..ticks {
            update_shield(&mut player, &mut field, &mut shield, &idle, &mut audio, &config, DT);
        }
        assert!(shield.is_none() && !player.is_shielded());
        assert_eq!(field.space.len(), 1);
    }

    #[test]
    fn shield_needs_a_charge() {
        let (config, mut field, mut player) = setup();
        player.shields = 0;
        let mut shield = None;
        let mut audio = CueBoard::default();
        let hold = ActionInput::default().with_held(Action::Shield);
        update_shield(&mut player, &mut field, &mut shield, &hold, &mut audio, &config, DT);
        assert!(shield.is_none());
        assert!(!player.is_shielded());
    }

    #[test]
    fn fire_spawns_laser_ahead_of_nose() {
        let (config, mut field, mut player) = setup();
        let mut audio = CueBoard::default();
        let hold = ActionInput::default().with_held(Action::Fire);
        let id = fire(&mut player, &mut field, &hold, &mut audio, &config).expect("first shot");
        let laser = field.lasers.get(id).expect("laser stored");
        assert_eq!(laser.position, Vec2::new(640.0, 360.0 - config.laser_spawn_offset));
        assert_eq!(audio.started(), &[SoundCue::LaserOne]);
        assert!(fire(&mut player, &mut field, &hold, &mut audio, &config).is_none());
    }

    #[test]
    fn sounding_laser_cue_is_not_cut_off() {
        let (config, mut field, mut player) = setup();
        let mut audio = CueBoard::default();
        audio.play(SoundCue::LaserOne);
        audio.drain_started();
        let hold = ActionInput::default().with_held(Action::Fire);
        assert!(fire(&mut player, &mut field, &hold, &mut audio, &config).is_some());
        assert!(audio.started().is_empty());
        assert!(audio.drain_stopped().is_empty());
        assert!(audio.is_playing(SoundCue::LaserOne));
    }

    #[test]
    fn hyperspace_lands_on_free_spot() {
        let (config, mut field, mut player) = setup();
        let mut rng = GameRng::seed_from_u64(42);
        let press = ActionInput::default().with_pressed(Action::Hyperspace);
        let outcome = try_hyperspace(&mut player, &mut field, None, &press, &mut rng, &config);
        let HyperspaceOutcome::Jumped { to } = outcome else {
            panic!("empty field must accept a jump, got {outcome:?}");
        };
        assert_eq!(player.position, to);
        assert!(!player.hyperspace_available());
        assert_eq!(
            try_hyperspace(&mut player, &mut field, None, &press, &mut rng, &config),
            HyperspaceOutcome::CoolingDown
        );
    }

    #[test]
    fn hyperspace_in_packed_field_keeps_position_and_cooldown() {
        let (config, mut field, mut player) = setup();
        field.space.add(
            Hitbox::Circle { radius: 1000.0 },
            Category::MeteorLarge,
            99,
            config.screen_center(),
        );
        let mut rng = GameRng::seed_from_u64(42);
        let press = ActionInput::default().with_pressed(Action::Hyperspace);
        let outcome = try_hyperspace(&mut player, &mut field, None, &press, &mut rng, &config);
        assert_eq!(outcome, HyperspaceOutcome::NoSafeSpot);
        assert_eq!(player.position, Vec2::new(640.0, 360.0));
        assert!(player.hyperspace_available(), "failed jump must not start the cooldown");
    }

    #[test]
    fn dying_ship_ignores_controls() {
        let (config, mut field, mut player) = setup();
        let mut audio = CueBoard::default();
        let mut rng = GameRng::seed_from_u64(1);
        let mut shield = None;
        let mut exhaust = None;
        player.begin_dying(&config);
        let input = ActionInput::default()
            .with_held(Action::Thrust)
            .with_held(Action::Fire)
            .with_held(Action::Shield);
        let mut tick = Tick {
            dt: DT,
            input: &input,
            config: &config,
            audio: &mut audio,
            rng: &mut rng,
        };
        update_player(&mut player, &mut field, &mut shield, &mut exhaust, &mut tick);
        assert_eq!(player.position, Vec2::new(640.0, 360.0));
        assert!(field.lasers.is_empty());
        assert!(shield.is_none() && exhaust.is_none());
    }
}
