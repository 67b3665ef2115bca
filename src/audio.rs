//! Sound cues.
//!
//! The simulation only names cues; a [`SoundSink`] decides what playing one
//! means.  [`CueBoard`] is the in-game sink: it remembers which cues are
//! currently sounding (using each cue's nominal length) and queues start/stop
//! requests that [`play_cues_system`] turns into Bevy audio entities.

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Every sound the game can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Thrust,
    LaserOne,
    LaserTwo,
    LaserThree,
    Explosion,
    BeatOne,
    BeatTwo,
    ShieldUp,
    AlienEngine,
    AlienLaser,
}

impl SoundCue {
    pub const ALL: [SoundCue; 10] = [
        SoundCue::Thrust,
        SoundCue::LaserOne,
        SoundCue::LaserTwo,
        SoundCue::LaserThree,
        SoundCue::Explosion,
        SoundCue::BeatOne,
        SoundCue::BeatTwo,
        SoundCue::ShieldUp,
        SoundCue::AlienEngine,
        SoundCue::AlienLaser,
    ];

    /// Asset path relative to `assets/`.
    pub fn asset_path(self) -> &'static str {
        match self {
            SoundCue::Thrust => "audio/thrust.ogg",
            SoundCue::LaserOne => "audio/laser_one.ogg",
            SoundCue::LaserTwo => "audio/laser_two.ogg",
            SoundCue::LaserThree => "audio/laser_three.ogg",
            SoundCue::Explosion => "audio/explosion.ogg",
            SoundCue::BeatOne => "audio/beat_one.ogg",
            SoundCue::BeatTwo => "audio/beat_two.ogg",
            SoundCue::ShieldUp => "audio/shield.ogg",
            SoundCue::AlienEngine => "audio/alien_engine.ogg",
            SoundCue::AlienLaser => "audio/alien_laser.ogg",
        }
    }

    /// Approximate clip length (s), used to answer [`SoundSink::is_playing`].
    pub fn nominal_duration(self) -> f32 {
        match self {
            SoundCue::Thrust => 1.0,
            SoundCue::LaserOne | SoundCue::LaserTwo | SoundCue::LaserThree => 0.25,
            SoundCue::Explosion => 0.6,
            SoundCue::BeatOne | SoundCue::BeatTwo => 0.15,
            SoundCue::ShieldUp => 0.8,
            SoundCue::AlienEngine => 1.5,
            SoundCue::AlienLaser => 0.3,
        }
    }
}

/// Audio collaborator used by the simulation.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
    fn is_playing(&self, cue: SoundCue) -> bool;
    fn rewind(&mut self, cue: SoundCue);
    fn pause(&mut self, cue: SoundCue);
}

/// Starts `cue` from the beginning unless it is already sounding.
pub fn play_once(sink: &mut dyn SoundSink, cue: SoundCue) {
    if !sink.is_playing(cue) {
        sink.rewind(cue);
        sink.play(cue);
    }
}

/// Starts `cue` from the beginning, cutting off a running instance.
pub fn restart(sink: &mut dyn SoundSink, cue: SoundCue) {
    sink.rewind(cue);
    sink.play(cue);
}

/// Tracks playing cues and pending playback requests.
#[derive(Resource, Debug, Clone, Default)]
pub struct CueBoard {
    /// Seconds left for each sounding cue.
    playing: HashMap<SoundCue, f32>,
    started: Vec<SoundCue>,
    stopped: Vec<SoundCue>,
}

impl CueBoard {
    /// Advances nominal playback by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.playing.retain(|_, remaining| {
            *remaining -= dt;
            *remaining > 0.0
        });
    }

    /// Start requests since the last drain.
    pub fn drain_started(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.started)
    }

    /// Stop requests since the last drain.
    pub fn drain_stopped(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.stopped)
    }

    /// Start requests not yet drained.
    pub fn started(&self) -> &[SoundCue] {
        &self.started
    }
}

impl SoundSink for CueBoard {
    fn play(&mut self, cue: SoundCue) {
        self.playing.insert(cue, cue.nominal_duration());
        self.started.push(cue);
    }

    fn is_playing(&self, cue: SoundCue) -> bool {
        self.playing.contains_key(&cue)
    }

    fn rewind(&mut self, cue: SoundCue) {
        if self.playing.remove(&cue).is_some() {
            self.stopped.push(cue);
        }
    }

    fn pause(&mut self, cue: SoundCue) {
        if self.playing.remove(&cue).is_some() {
            self.stopped.push(cue);
        }
    }
}

/// Loaded clips.  Cues without an asset on disk stay silent.
#[derive(Resource, Debug, Default)]
pub struct CueLibrary {
    clips: HashMap<SoundCue, Handle<AudioSource>>,
}

/// Marks an audio entity spawned for a cue.
#[derive(Component, Debug, Clone, Copy)]
pub struct CuePlayback(pub SoundCue);

/// Startup system: load every cue whose file exists under `assets/`.
pub fn load_cue_library(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut library = CueLibrary::default();
    for cue in SoundCue::ALL {
        let path = cue.asset_path();
        if Path::new("assets").join(path).exists() {
            library.clips.insert(cue, asset_server.load(path));
        } else {
            debug!("no clip for {:?} at assets/{}", cue, path);
        }
    }
    info!("Loaded {} of {} sound cues", library.clips.len(), SoundCue::ALL.len());
    commands.insert_resource(library);
}

/// Turns queued cue requests into playing audio entities.
pub fn play_cues_system(
    mut commands: Commands,
    mut board: ResMut<CueBoard>,
    library: Option<Res<CueLibrary>>,
    playing: Query<(Entity, &CuePlayback)>,
) {
    for cue in board.drain_stopped() {
        for (entity, playback) in playing.iter() {
            if playback.0 == cue {
                commands.entity(entity).despawn();
            }
        }
    }
    let started = board.drain_started();
    let Some(library) = library else {
        return;
    };
    for cue in started {
        if let Some(clip) = library.clips.get(&cue) {
            commands.spawn((
                AudioPlayer::new(clip.clone()),
                PlaybackSettings::DESPAWN,
                CuePlayback(cue),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_once_does_not_overlap() {
        let mut board = CueBoard::default();
        play_once(&mut board, SoundCue::Thrust);
        play_once(&mut board, SoundCue::Thrust);
        assert_eq!(board.started(), &[SoundCue::Thrust]);
    }

    #[test]
    fn cue_finishes_after_nominal_duration() {
        let mut board = CueBoard::default();
        board.play(SoundCue::Explosion);
        board.advance(0.5);
        assert!(board.is_playing(SoundCue::Explosion));
        board.advance(0.2);
        assert!(!board.is_playing(SoundCue::Explosion));
        play_once(&mut board, SoundCue::Explosion);
        assert_eq!(board.drain_started().len(), 2);
    }

    #[test]
    fn pause_requests_stop() {
        let mut board = CueBoard::default();
        board.play(SoundCue::Thrust);
        board.pause(SoundCue::Thrust);
        assert!(!board.is_playing(SoundCue::Thrust));
        assert_eq!(board.drain_stopped(), vec![SoundCue::Thrust]);
        board.pause(SoundCue::Thrust);
        assert!(board.drain_stopped().is_empty());
    }

    #[test]
    fn restart_cuts_running_instance() {
        let mut board = CueBoard::default();
        board.play(SoundCue::BeatOne);
        restart(&mut board, SoundCue::BeatOne);
        assert_eq!(board.drain_stopped(), vec![SoundCue::BeatOne]);
        assert_eq!(board.drain_started(), vec![SoundCue::BeatOne, SoundCue::BeatOne]);
    }
}
