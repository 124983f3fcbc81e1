use bevy::prelude::*;

pub mod assets;
pub mod audio;
pub mod camera;
pub mod neon_render;
pub mod rain_render;
pub mod thunder_render;

use effects::EffectsSet;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<camera::OrbitCamera>()
            .init_resource::<camera::CameraTarget>()
            .add_systems(Startup, camera::setup_camera)
            .add_systems(
                Update,
                (
                    camera::camera_orbit_mouse,
                    camera::camera_zoom_scroll,
                    camera::camera_pan_keyboard,
                    camera::camera_preset_ease,
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    rain_render::sync_rain_transforms,
                    neon_render::apply_neon_flicker,
                    thunder_render::apply_thunder,
                    audio::play_thunder_claps,
                    audio::sync_concert_audio,
                    audio::advance_concert_track,
                )
                    .after(EffectsSet),
            )
            .add_systems(Update, assets::log_asset_load_failures);
    }
}
