//! Downstream audio playback for the effect state.
//!
//! The effects crate owns what should be audible (thunder strikes, concert
//! track index, crowd fade level); this module turns that into actual
//! `AudioPlayer` entities and sink volume changes. Missing audio files are
//! reported by the asset failure logger and the scene plays on silently.

use bevy::audio::Volume;
use bevy::prelude::*;

use effects::concert::{ConcertPhase, ConcertState, MUSIC_VOLUME};
use effects::config::EffectsSettings;
use effects::thunder::ThunderStrike;

/// Marker for the currently playing concert music entity.
#[derive(Component)]
pub struct MusicTrack(pub usize);

/// Marker for the crowd ambience entity.
#[derive(Component)]
pub struct CrowdLayer;

/// Map a strike peak to clap volume: quiet strikes ~0.3, the loudest ~0.5.
pub fn clap_volume(peak: f32, min_peak: f32, peak_span: f32) -> f32 {
    let normalized = if peak_span > 0.0 {
        ((peak - min_peak) / peak_span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    0.3 + 0.2 * normalized
}

/// Spawn a looping ambience track (used by the rain scene at startup).
pub fn spawn_looping_ambience(commands: &mut Commands, asset_server: &AssetServer, path: &str) {
    commands.spawn((
        AudioPlayer::new(asset_server.load(path.to_owned())),
        PlaybackSettings::LOOP.with_volume(Volume::new(0.4)),
    ));
}

/// System: one thunder clap per strike, volume scaled by the strike peak.
pub fn play_thunder_claps(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<EffectsSettings>,
    mut strikes: EventReader<ThunderStrike>,
) {
    for strike in strikes.read() {
        let volume = clap_volume(
            strike.peak,
            settings.thunder.min_peak,
            settings.thunder.peak_span,
        );
        commands.spawn((
            AudioPlayer::new(asset_server.load("audio/thunder.ogg")),
            PlaybackSettings::DESPAWN.with_volume(Volume::new(volume)),
        ));
    }
}

/// System: keep the playing audio entities in line with [`ConcertState`].
pub fn sync_concert_audio(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    concert: Res<ConcertState>,
    music: Query<(Entity, &MusicTrack, Option<&AudioSink>)>,
    crowd: Query<(Entity, Option<&AudioSink>), With<CrowdLayer>>,
) {
    match concert.phase {
        ConcertPhase::Idle => {
            for (entity, _, _) in &music {
                commands.entity(entity).despawn();
            }
            for (entity, _) in &crowd {
                commands.entity(entity).despawn();
            }
        }
        ConcertPhase::Playing => {
            // Music: exactly one entity, for the current track.
            let mut have_current = false;
            for (entity, track, _) in &music {
                if track.0 == concert.track {
                    have_current = true;
                } else {
                    commands.entity(entity).despawn();
                }
            }
            if !have_current {
                let path = format!("audio/music{}.ogg", concert.track + 1);
                commands.spawn((
                    MusicTrack(concert.track),
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::ONCE.with_volume(Volume::new(MUSIC_VOLUME)),
                ));
            }

            // Crowd: one looping layer, faded in by the effects crate.
            if let Some(cue) = concert.crowd_cue {
                if crowd.is_empty() {
                    let path = format!("audio/crowd{}.ogg", cue + 1);
                    commands.spawn((
                        CrowdLayer,
                        AudioPlayer::new(asset_server.load(path)),
                        PlaybackSettings::LOOP.with_volume(Volume::new(0.0)),
                    ));
                }
                for (_, sink) in &crowd {
                    if let Some(sink) = sink {
                        sink.set_volume(concert.crowd_volume);
                    }
                }
            }
        }
    }
}

/// System: when the current track's sink runs dry, move to the next track.
/// `sync_concert_audio` then swaps the audio entity over.
pub fn advance_concert_track(
    mut concert: ResMut<ConcertState>,
    music: Query<(&MusicTrack, &AudioSink)>,
) {
    if concert.phase != ConcertPhase::Playing {
        return;
    }
    for (track, sink) in &music {
        if track.0 == concert.track && sink.empty() {
            concert.advance_track();
            debug!("concert advancing to track {}", concert.track + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap_volume_bounds() {
        assert_eq!(clap_volume(10.0, 10.0, 50.0), 0.3);
        assert_eq!(clap_volume(60.0, 10.0, 50.0), 0.5);
        // Out-of-range peaks clamp rather than blow out the mix.
        assert_eq!(clap_volume(500.0, 10.0, 50.0), 0.5);
        assert_eq!(clap_volume(-5.0, 10.0, 50.0), 0.3);
    }

    #[test]
    fn test_clap_volume_degenerate_span() {
        assert_eq!(clap_volume(10.0, 10.0, 0.0), 0.3);
    }
}
