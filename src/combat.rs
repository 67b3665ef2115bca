//! Collision resolution.
//!
//! Runs once per tick after every entity has moved.  Which pairs of shapes
//! matter, and what they mean, is decided by [`CONTACT_TABLE`]; everything
//! else (meteor on meteor, shield on laser, ...) passes through.
//!
//! ## Passes
//!
//! 1. Ship vs meteors: the shield deflects, otherwise the ship is destroyed.
//! 2. Ship vs aliens and alien lasers: lethal unless shielded.
//! 3. Each player laser vs meteors: one kill per laser, large meteors break up.
//! 4. Each remaining player laser vs aliens.
//!
//! Destroyed meteors and aliens leave the spatial index at once, so no later
//! laser can hit them again this tick.  Small meteors from a break-up are
//! spawned after all passes and so collide from the next tick on.

use crate::audio::{play_once, SoundCue};
use crate::meteor::{fragment_seeds, MeteorSize};
use crate::player::Player;
use crate::spatial_partition::{Category, ShapeId};
use crate::world::{Playfield, Tick};

/// What a pair of overlapping shapes means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    PlayerMeteor,
    PlayerAlien,
    PlayerAlienLaser,
    LaserMeteor,
    LaserAlien,
}

/// Category pairs that interact.  Lookup is symmetric.
pub const CONTACT_TABLE: &[(Category, Category, Contact)] = &[
    (Category::Player, Category::MeteorLarge, Contact::PlayerMeteor),
    (Category::Player, Category::MeteorSmall, Contact::PlayerMeteor),
    (Category::Player, Category::Alien, Contact::PlayerAlien),
    (Category::Player, Category::AlienLaser, Contact::PlayerAlienLaser),
    (Category::Laser, Category::MeteorLarge, Contact::LaserMeteor),
    (Category::Laser, Category::MeteorSmall, Contact::LaserMeteor),
    (Category::Laser, Category::Alien, Contact::LaserAlien),
];

pub fn classify(a: Category, b: Category) -> Option<Contact> {
    CONTACT_TABLE
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, contact)| contact)
}

/// What happened during one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub player_hit: bool,
    pub points: u32,
    pub meteors_destroyed: u32,
    pub aliens_destroyed: u32,
    pub fragments_spawned: u32,
    pub deflections: u32,
}

/// Applies every collision rule for this tick.
///
/// `base_meteor_speed` is the director's current base speed; deflected
/// meteors and new fragments move at it.
pub fn resolve_collisions(
    field: &mut Playfield,
    player: &mut Player,
    base_meteor_speed: f32,
    tick: &mut Tick<'_>,
) -> CombatReport {
    let mut report = CombatReport::default();
    resolve_player_contacts(field, player, base_meteor_speed, tick, &mut report);

    let mut fragments = Vec::new();
    for laser_id in field.lasers.ids() {
        let Some(laser_shape) = field.lasers.get(laser_id).map(|l| l.shape) else {
            continue;
        };
        let Some(meteor_id) = first_contact(field, laser_shape, Contact::LaserMeteor) else {
            continue;
        };
        let Some(meteor) = field.meteors.get_mut(meteor_id) else {
            continue;
        };
        if !meteor.is_active() {
            continue;
        }
        meteor.explode(&mut field.space);
        report.meteors_destroyed += 1;
        report.points += meteor.size.points(tick.config);
        if meteor.size == MeteorSize::Large {
            fragments.extend(fragment_seeds(
                meteor.position,
                base_meteor_speed,
                tick.config,
                tick.rng,
            ));
        }
        play_once(tick.audio, SoundCue::Explosion);
        field.despawn_laser(laser_id);
    }

    for laser_id in field.lasers.ids() {
        let Some(laser_shape) = field.lasers.get(laser_id).map(|l| l.shape) else {
            continue;
        };
        let Some(alien_id) = first_contact(field, laser_shape, Contact::LaserAlien) else {
            continue;
        };
        let Some(alien) = field.aliens.get_mut(alien_id) else {
            continue;
        };
        if !alien.is_active() {
            continue;
        }
        alien.explode(&mut field.space);
        let last_shot = alien.last_shot.take();
        report.aliens_destroyed += 1;
        report.points += tick.config.alien_points;
        if let Some(shot) = last_shot {
            field.despawn_alien_laser(shot);
        }
        play_once(tick.audio, SoundCue::Explosion);
        field.despawn_laser(laser_id);
    }

    report.fragments_spawned = fragments.len() as u32;
    for seed in fragments {
        field.spawn_meteor(seed, tick.config);
    }
    report
}

fn resolve_player_contacts(
    field: &mut Playfield,
    player: &mut Player,
    base_meteor_speed: f32,
    tick: &mut Tick<'_>,
    report: &mut CombatReport,
) {
    if !player.is_alive() {
        return;
    }
    let shielded = player.is_shielded();
    let center = tick.config.screen_center();

    for shape in field.space.intersecting(player.shape) {
        let Some(collider) = field.space.get(shape).copied() else {
            continue;
        };
        match classify(Category::Player, collider.category) {
            Some(Contact::PlayerMeteor) if shielded => {
                if let Some(meteor) = field.meteors.get_mut(collider.owner) {
                    meteor.deflect_from(center, base_meteor_speed);
                    report.deflections += 1;
                }
            }
            Some(Contact::PlayerMeteor | Contact::PlayerAlien | Contact::PlayerAlienLaser)
                if !shielded =>
            {
                report.player_hit = true;
                break;
            }
            _ => {}
        }
    }

    if report.player_hit {
        player.begin_dying(tick.config);
        play_once(tick.audio, SoundCue::Explosion);
    }
}

/// Owner id of the first shape overlapping `shape` whose pairing is `wanted`.
fn first_contact(field: &Playfield, shape: ShapeId, wanted: Contact) -> Option<u32> {
    let subject = field.space.get(shape)?.category;
    field
        .space
        .intersecting(shape)
        .into_iter()
        .filter_map(|other| field.space.get(other))
        .find(|c| classify(subject, c.category) == Some(wanted))
        .map(|c| c.owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alien::AlienSeed;
    use crate::audio::{CueBoard, SoundSink};
    use crate::config::GameConfig;
    use crate::input::ActionInput;
    use crate::meteor::MeteorSeed;
    use crate::world::GameRng;
    use bevy::math::Vec2;
    use rand::SeedableRng;

    fn meteor_at(size: MeteorSize, position: Vec2) -> MeteorSeed {
        MeteorSeed {
            size,
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.0,
            variant: 0,
            entered: true,
        }
    }

    struct Harness {
        config: GameConfig,
        field: Playfield,
        player: Player,
        audio: CueBoard,
        rng: GameRng,
    }

    impl Harness {
        fn new() -> Self {
            let config = GameConfig::default();
            let mut field = Playfield::new(&config);
            let player = Player::register(Vec2::new(100.0, 100.0), 3, 3, &mut field.space, &config);
            Self {
                config,
                field,
                player,
                audio: CueBoard::default(),
                rng: GameRng::seed_from_u64(17),
            }
        }

        fn resolve(&mut self) -> CombatReport {
            let input = ActionInput::default();
            let mut tick = Tick {
                dt: 1.0 / 60.0,
                input: &input,
                config: &self.config,
                audio: &mut self.audio,
                rng: &mut self.rng,
            };
            resolve_collisions(&mut self.field, &mut self.player, 15.0, &mut tick)
        }
    }

    #[test]
    fn table_lookup_is_symmetric() {
        assert_eq!(
            classify(Category::MeteorSmall, Category::Laser),
            Some(Contact::LaserMeteor)
        );
        assert_eq!(
            classify(Category::Laser, Category::MeteorSmall),
            Some(Contact::LaserMeteor)
        );
        assert_eq!(classify(Category::MeteorLarge, Category::MeteorSmall), None);
        assert_eq!(classify(Category::Shield, Category::MeteorLarge), None);
        assert_eq!(classify(Category::Laser, Category::AlienLaser), None);
    }

    #[test]
    fn laser_breaks_large_meteor() {
        let mut h = Harness::new();
        let meteor = h
            .field
            .spawn_meteor(meteor_at(MeteorSize::Large, Vec2::new(600.0, 400.0)), &h.config);
        h.field.spawn_laser(Vec2::new(600.0, 400.0), 0.0, &h.config);

        let report = h.resolve();
        assert_eq!(report.meteors_destroyed, 1);
        assert_eq!(report.points, h.config.large_meteor_points);
        assert!(h.field.lasers.is_empty(), "laser is consumed");
        assert!(!h.field.meteors.get(meteor).map_or(true, |m| m.is_active()));
        assert_eq!(h.field.meteors.len(), 1 + report.fragments_spawned as usize);
        assert!(h.audio.is_playing(SoundCue::Explosion));

        assert_eq!(h.field.reap_exploded(), 1);
        assert!(h.field.meteors.values().all(|m| m.size == MeteorSize::Small));
    }

    #[test]
    fn overlapping_lasers_kill_a_meteor_once() {
        let mut h = Harness::new();
        h.field
            .spawn_meteor(meteor_at(MeteorSize::Small, Vec2::new(600.0, 400.0)), &h.config);
        let first = h.field.spawn_laser(Vec2::new(598.0, 400.0), 0.0, &h.config);
        let second = h.field.spawn_laser(Vec2::new(602.0, 400.0), 0.0, &h.config);

        let report = h.resolve();
        assert_eq!(report.meteors_destroyed, 1);
        assert_eq!(report.points, h.config.small_meteor_points);
        assert!(h.field.lasers.get(first).is_none());
        assert!(h.field.lasers.get(second).is_some(), "second laser flies on");
    }

    #[test]
    fn fragments_do_not_collide_on_their_spawn_tick() {
        let mut h = Harness::new();
        h.field
            .spawn_meteor(meteor_at(MeteorSize::Large, Vec2::new(600.0, 400.0)), &h.config);
        h.field.spawn_laser(Vec2::new(600.0, 400.0), 0.0, &h.config);
        // A wall of lasers all around the meteor that would hit any fragment.
        for dx in [-75.0, 75.0] {
            for dy in [-75.0, 75.0] {
                h.field
                    .spawn_laser(Vec2::new(600.0 + dx, 400.0 + dy), 0.0, &h.config);
            }
        }
        let report = h.resolve();
        assert_eq!(report.meteors_destroyed, 1);
    }

    #[test]
    fn unshielded_ship_dies_on_meteor_contact() {
        let mut h = Harness::new();
        h.field
            .spawn_meteor(meteor_at(MeteorSize::Small, Vec2::new(110.0, 100.0)), &h.config);
        let report = h.resolve();
        assert!(report.player_hit);
        assert!(h.player.is_dying());
        assert!(h.audio.is_playing(SoundCue::Explosion));

        // A dying ship is not hit again.
        assert!(!h.resolve().player_hit);
    }

    #[test]
    fn shield_deflects_meteor_away_from_centre() {
        let mut h = Harness::new();
        h.player.shield_timer = Some(crate::timer::Countdown::new(6.0));
        let id = h
            .field
            .spawn_meteor(meteor_at(MeteorSize::Large, Vec2::new(110.0, 100.0)), &h.config);
        let report = h.resolve();
        assert!(!report.player_hit);
        assert_eq!(report.deflections, 1);
        let meteor = h.field.meteors.get(id).expect("meteor survives");
        let away = (meteor.position - h.config.screen_center()).normalize();
        assert!((meteor.velocity.normalize() - away).length() < 1e-4);
        assert!((meteor.velocity.length() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn shield_blocks_alien_lasers() {
        let mut h = Harness::new();
        h.player.shield_timer = Some(crate::timer::Countdown::new(6.0));
        h.field
            .spawn_alien_laser(0, Vec2::new(100.0, 100.0), 0.0, &h.config);
        assert!(!h.resolve().player_hit);
    }

    #[test]
    fn shield_blocks_alien_contact() {
        let mut h = Harness::new();
        h.player.shield_timer = Some(crate::timer::Countdown::new(6.0));
        h.field.spawn_alien(
            AlienSeed {
                position: Vec2::new(100.0, 100.0),
                velocity: Vec2::ZERO,
                intelligent: false,
            },
            &h.config,
        );
        let report = h.resolve();
        assert!(!report.player_hit);
        assert!(h.player.is_alive());
        assert_eq!(h.field.active_alien_count(), 1);
    }

    #[test]
    fn killing_an_alien_removes_its_last_shot() {
        let mut h = Harness::new();
        let alien = h.field.spawn_alien(
            AlienSeed {
                position: Vec2::new(900.0, 500.0),
                velocity: Vec2::ZERO,
                intelligent: false,
            },
            &h.config,
        );
        let shot = h
            .field
            .spawn_alien_laser(alien, Vec2::new(300.0, 600.0), 0.0, &h.config);
        if let Some(a) = h.field.aliens.get_mut(alien) {
            a.last_shot = Some(shot);
        }
        h.field.spawn_laser(Vec2::new(900.0, 500.0), 0.0, &h.config);

        let report = h.resolve();
        assert_eq!(report.aliens_destroyed, 1);
        assert_eq!(report.points, h.config.alien_points);
        assert!(h.field.alien_lasers.is_empty());
        assert!(h.field.lasers.is_empty());
        assert_eq!(h.field.active_alien_count(), 0);
    }
}
