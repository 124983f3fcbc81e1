//! Product-shot vignette: a metallic slab on a dark floor, three light
//! sources, and a translucent cone faking a volumetric beam. The centerpiece
//! scales in with an exponential ease while the camera settles.

use bevy::prelude::*;

use rendering::camera::OrbitCamera;

const INTRO_SECS: f32 = 1.6;
const INTRO_START_DISTANCE: f32 = 18.0;
const INTRO_END_DISTANCE: f32 = 6.0;

pub struct ShowcasePlugin;

impl Plugin for ShowcasePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitCamera {
            focus: Vec3::new(0.0, 0.8, 0.0),
            yaw: 0.5,
            pitch: 0.35,
            distance: INTRO_START_DISTANCE,
        })
        .add_systems(Startup, setup_showcase)
        .add_systems(Update, run_intro_tween);
    }
}

/// Scale-in animation on the centerpiece, paired with a camera dolly.
#[derive(Component)]
struct IntroTween {
    elapsed: f32,
}

fn setup_showcase(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.03)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 25.0,
    });

    // Centerpiece.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.5, 1.0, 1.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x55, 0x7f, 0xa3),
            metallic: 0.6,
            perceptual_roughness: 0.2,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.5, 0.0).with_scale(Vec3::ZERO),
        IntroTween { elapsed: 0.0 },
    ));

    // Floor.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(15.0)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.08, 0.08, 0.1),
            perceptual_roughness: 0.4,
            metallic: 0.2,
            ..default()
        })),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 3_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            color: Color::srgb(0.9, 0.7, 0.5),
            intensity: 300_000.0,
            range: 20.0,
            ..default()
        },
        Transform::from_xyz(-4.0, 3.0, -2.0),
    ));
    commands.spawn((
        SpotLight {
            color: Color::srgb(0.8, 0.9, 1.0),
            intensity: 1_500_000.0,
            range: 25.0,
            inner_angle: std::f32::consts::PI / 16.0,
            outer_angle: std::f32::consts::PI / 10.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 8.0, 3.0).looking_at(Vec3::new(0.0, 0.5, 0.0), Vec3::Y),
    ));

    // Translucent cone under the spot; sells the beam without volumetrics.
    commands.spawn((
        Mesh3d(meshes.add(Cone {
            radius: 2.2,
            height: 7.5,
        })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.8, 0.9, 1.0, 0.06),
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(0.0, 4.25, 1.5).with_rotation(Quat::from_rotation_arc(
            Vec3::Y,
            Vec3::new(0.0, 7.5, 3.0).normalize(),
        )),
    ));
}

/// Exponential ease-out, matching the feel of a title-card reveal.
fn expo_out(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - (2.0f32).powf(-10.0 * t)
    }
}

fn run_intro_tween(
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
    mut tweens: Query<(&mut IntroTween, &mut Transform)>,
) {
    for (mut tween, mut transform) in &mut tweens {
        if tween.elapsed >= INTRO_SECS {
            continue;
        }
        tween.elapsed += time.delta_secs();
        let t = (tween.elapsed / INTRO_SECS).min(1.0);
        transform.scale = Vec3::splat(expo_out(t));
        // Camera eases in over the same window; presets take over afterwards.
        orbit.distance =
            INTRO_START_DISTANCE + (INTRO_END_DISTANCE - INTRO_START_DISTANCE) * (t * t);
    }
}
