//! Concert state for the stage scene.
//!
//! Owns the data side of the concert: whether it is running, which music
//! track should be playing, which crowd layer is cued, and the crowd fade
//! level. Actual playback is handled downstream by the rendering/audio layer;
//! this module never touches audio sinks.

use bevy::prelude::*;
use rand::Rng;

use crate::rng::EffectsRng;

/// Number of alternating music tracks (`audio/music1.ogg`, `audio/music2.ogg`).
pub const MUSIC_TRACK_COUNT: usize = 2;
/// Number of crowd ambience layers (`audio/crowd1.ogg` ..).
pub const CROWD_LAYER_COUNT: usize = 3;
/// Crowd layers fade in toward this volume.
pub const CROWD_PEAK_VOLUME: f32 = 0.5;
/// Music track playback volume.
pub const MUSIC_VOLUME: f32 = 0.6;
/// Crowd fade-in rate, volume per second.
pub const CROWD_FADE_RATE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcertPhase {
    #[default]
    Idle,
    Playing,
}

/// Start/stop triggers sent by the control panel.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcertCommand {
    Start,
    Stop,
}

/// Concert data owned here, consumed by the audio layer.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ConcertState {
    pub phase: ConcertPhase,
    /// Index of the music track that should currently be playing.
    pub track: usize,
    /// Which crowd layer is cued, if any.
    pub crowd_cue: Option<usize>,
    /// Current crowd volume; ramps from 0 to [`CROWD_PEAK_VOLUME`].
    pub crowd_volume: f32,
    /// Seconds since the concert started.
    pub elapsed: f32,
}

impl Default for ConcertState {
    fn default() -> Self {
        Self {
            phase: ConcertPhase::Idle,
            track: 0,
            crowd_cue: None,
            crowd_volume: 0.0,
            elapsed: 0.0,
        }
    }
}

impl ConcertState {
    /// Move to the next track, wrapping. Called by the audio layer when the
    /// current track's sink runs dry.
    pub fn advance_track(&mut self) {
        self.track = (self.track + 1) % MUSIC_TRACK_COUNT;
    }
}

/// System: consume start/stop commands and ramp the crowd fade.
pub fn update_concert(
    time: Res<Time>,
    mut rng: ResMut<EffectsRng>,
    mut state: ResMut<ConcertState>,
    mut commands: EventReader<ConcertCommand>,
) {
    for command in commands.read() {
        match command {
            ConcertCommand::Start => {
                if state.phase == ConcertPhase::Idle {
                    state.phase = ConcertPhase::Playing;
                    state.track = 0;
                    state.crowd_cue = Some(rng.0.gen_range(0..CROWD_LAYER_COUNT));
                    state.crowd_volume = 0.0;
                    state.elapsed = 0.0;
                    info!("concert started (crowd layer {:?})", state.crowd_cue);
                }
            }
            ConcertCommand::Stop => {
                if state.phase == ConcertPhase::Playing {
                    info!("concert stopped after {:.1}s", state.elapsed);
                }
                *state = ConcertState::default();
            }
        }
    }

    if state.phase == ConcertPhase::Playing {
        state.elapsed += time.delta_secs();
        state.crowd_volume =
            (state.crowd_volume + CROWD_FADE_RATE * time.delta_secs()).min(CROWD_PEAK_VOLUME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle_and_silent() {
        let state = ConcertState::default();
        assert_eq!(state.phase, ConcertPhase::Idle);
        assert_eq!(state.crowd_volume, 0.0);
        assert!(state.crowd_cue.is_none());
    }

    #[test]
    fn test_crowd_fade_clamps_at_peak() {
        let mut state = ConcertState {
            phase: ConcertPhase::Playing,
            ..ConcertState::default()
        };
        // Simulate the ramp the system applies.
        for _ in 0..1000 {
            state.crowd_volume =
                (state.crowd_volume + CROWD_FADE_RATE * 0.016).min(CROWD_PEAK_VOLUME);
        }
        assert_eq!(state.crowd_volume, CROWD_PEAK_VOLUME);
    }

    #[test]
    fn test_advance_track_wraps() {
        let mut state = ConcertState::default();
        for _ in 0..MUSIC_TRACK_COUNT {
            state.advance_track();
        }
        assert_eq!(state.track, 0);
    }
}
