//! Concert stage.
//!
//! Four colored spotlights sweep over a stage, an overhead spot circles the
//! performer, and a flash light strobes through random colors. The control
//! panel starts and stops the concert; while music plays the camera pulls in
//! tight, otherwise it drifts around the stage drone-style.

use bevy::prelude::*;
use rand::Rng;

use effects::concert::{ConcertPhase, ConcertState};
use effects::rng::EffectsRng;
use rendering::camera::{CameraTarget, OrbitCamera};
use rendering::assets;

/// `tan(t)` drives the light sweeps and blows up at its poles; the clamp
/// keeps the whip-pan look without the infinities.
const TAN_CLAMP: f32 = 10.0;
/// Abstract strobe units → directional-light lux.
const FLASH_LUX: f32 = 600.0;

pub struct SpotlightStagePlugin;

impl Plugin for SpotlightStagePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitCamera {
            focus: Vec3::new(0.0, 0.0, 0.0),
            yaw: 0.0,
            pitch: 0.3,
            distance: 8.0,
        })
        .add_systems(Startup, setup_stage)
        .add_systems(
            Update,
            (animate_sweep_lights, animate_flash_light, stage_camera),
        );
    }
}

/// A moving stage spotlight. `pattern` picks which sweep the light follows.
#[derive(Component)]
struct SweepLight {
    pattern: u8,
    home: Vec3,
}

/// Overhead spot slowly circling the performer.
#[derive(Component)]
struct OverheadSpot;

/// The color-cycling strobe.
#[derive(Component)]
struct FlashLight;

fn setup_stage(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ClearColor(Color::srgb_u8(10, 10, 31)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 60.0,
    });

    // The stage itself.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(15.0, 0.5, 25.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x55, 0x7f, 0xa3),
            ..default()
        })),
        Transform::from_xyz(0.0, -2.3, 0.0),
    ));

    // Performer and DJ; if the models are missing the lights still dance.
    commands.spawn((
        SceneRoot(assets::gltf_scene(&asset_server, "models/performer.glb")),
        Transform::from_xyz(0.0, -2.0, 2.0).with_scale(Vec3::splat(2.2)),
    ));
    commands.spawn((
        SceneRoot(assets::gltf_scene(&asset_server, "models/dj.glb")),
        Transform::from_xyz(0.0, -2.0, -2.5).with_scale(Vec3::splat(1.8)),
    ));

    // Four sweeping color spots.
    let sweeps = [
        (Color::srgb_u8(0x9d, 0x00, 0xff), Vec3::new(10.0, 5.0, 15.0), 0),
        (Color::srgb_u8(0x00, 0xff, 0xff), Vec3::new(-10.0, 5.0, 15.0), 1),
        (Color::srgb_u8(0xff, 0x00, 0x7f), Vec3::new(0.0, 5.0, 15.0), 2),
        (Color::srgb_u8(0xff, 0x45, 0x00), Vec3::new(0.0, 5.0, -15.0), 3),
    ];
    for (color, home, pattern) in sweeps {
        commands.spawn((
            SweepLight { pattern, home },
            SpotLight {
                color,
                intensity: 2_000_000.0,
                range: 30.0,
                inner_angle: std::f32::consts::PI / 24.0,
                outer_angle: std::f32::consts::PI / 18.0,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(home).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }

    // Overhead spot.
    commands.spawn((
        OverheadSpot,
        SpotLight {
            color: Color::srgb_u8(0xbf, 0xaf, 0xff),
            intensity: 2_000_000.0,
            range: 30.0,
            inner_angle: std::f32::consts::PI * 0.05,
            outer_angle: std::f32::consts::PI * 0.07,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 20.0, 0.0).looking_at(Vec3::new(0.0, 0.0, -1.0), Vec3::Y),
    ));

    // The strobe.
    commands.spawn((
        FlashLight,
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 0.0,
            ..default()
        },
        Transform::from_xyz(2.0, 8.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn tan_clamped(x: f32) -> f32 {
    x.tan().clamp(-TAN_CLAMP, TAN_CLAMP)
}

fn animate_sweep_lights(
    time: Res<Time>,
    mut sweeps: Query<(&SweepLight, &mut Transform), Without<OverheadSpot>>,
    mut overhead: Query<&mut Transform, With<OverheadSpot>>,
) {
    let t = time.elapsed_secs();
    let s = (t * 1.5).sin();
    let tn = tan_clamped(t * 1.5);

    for (sweep, mut transform) in &mut sweeps {
        let mut pos = sweep.home;
        match sweep.pattern {
            0 => {
                pos.x = s * 10.0;
                pos.z = tn * 10.0;
            }
            1 => {
                pos.x = s * 10.0;
                pos.z = -tn * 10.0;
            }
            2 => {
                pos.y = (s * 10.0).max(1.0);
                pos.z = tn * 10.0;
            }
            _ => {
                pos.y = (s * 10.0).max(1.0);
                pos.x = -tn * 10.0;
            }
        }
        *transform = Transform::from_translation(pos).looking_at(Vec3::ZERO, Vec3::Y);
    }

    for mut transform in &mut overhead {
        let pos = Vec3::new((t * 0.5).sin(), 20.0, (t * 0.5).cos());
        *transform = Transform::from_translation(pos).looking_at(Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
    }
}

fn animate_flash_light(
    time: Res<Time>,
    mut rng: ResMut<EffectsRng>,
    mut flashes: Query<&mut DirectionalLight, With<FlashLight>>,
) {
    let t = time.elapsed_secs();
    for mut light in &mut flashes {
        let next = Color::srgb(rng.0.gen(), rng.0.gen(), rng.0.gen());
        light.color = light.color.mix(&next, 0.05);
        light.illuminance = (t * 10.0).sin().abs() * 10.0 * FLASH_LUX;
    }
}

/// Drone orbit while idle; pull in tight toward the performer while playing.
/// Yields to an active control-panel preset until it finishes.
fn stage_camera(
    time: Res<Time>,
    concert: Res<ConcertState>,
    target: Res<CameraTarget>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if target.active {
        return;
    }
    let t = time.elapsed_secs();
    let blend = 1.0 - (-2.0 * time.delta_secs()).exp();

    match concert.phase {
        ConcertPhase::Playing => {
            let zoom = 3.0 + (t * 0.8).sin();
            orbit.distance += (zoom - orbit.distance) * blend;
            orbit.yaw += (0.0 - orbit.yaw) * blend;
            orbit.pitch += (0.35 - orbit.pitch) * blend;
            orbit.focus.y = (t * 2.0).sin() * 0.5;
        }
        ConcertPhase::Idle => {
            orbit.yaw = t * 0.2;
            orbit.pitch += (0.3 + (t * 0.5).sin() * 0.15 - orbit.pitch) * blend;
            orbit.distance += (8.0 - orbit.distance) * blend;
            orbit.focus.y += (0.0 - orbit.focus.y) * blend;
        }
    }
}
