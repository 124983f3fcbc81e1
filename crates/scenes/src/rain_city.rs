//! Cyberpunk street in the rain.
//!
//! The full effects stack runs here: the rain particle pool, two flickering
//! neon signs, and the thunder flash state machine, plus a GLTF figure that
//! walks up the street toward the camera. Heavy fog and a dim blue moon keep
//! the street dark enough for the neon to carry the scene.

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use rand::Rng;

use effects::config::{EffectsSettings, ThunderConfig};
use effects::rng::EffectsRng;
use rendering::camera::{setup_camera, OrbitCamera};
use rendering::{assets, audio, neon_render, rain_render, thunder_render};

/// Units per second (0.1 units per frame at the 60 FPS baseline).
const WALKER_SPEED: f32 = 6.0;
/// The walker stops this close to the camera end of the street.
const WALKER_TARGET_Z: f32 = 10.0;

pub struct RainCityPlugin;

impl Plugin for RainCityPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EffectsSettings {
            thunder: ThunderConfig::storm(),
            ..default()
        })
        .insert_resource(OrbitCamera {
            focus: Vec3::new(0.0, 3.0, 0.0),
            yaw: 0.0,
            pitch: 0.18,
            distance: 30.0,
        })
        .add_systems(
            Startup,
            (
                setup_atmosphere.after(setup_camera),
                spawn_street,
                spawn_lighting,
                rain_render::spawn_rain,
                spawn_walker_and_ambience,
            ),
        )
        .add_systems(Update, walker_approach);
    }
}

/// Fog, clear color, ambient fill, and the moon.
fn setup_atmosphere(mut commands: Commands, camera: Query<Entity, With<Camera3d>>) {
    let night = Color::srgb(0.05, 0.05, 0.06);
    commands.insert_resource(ClearColor(night));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.38, 0.42, 0.5),
        brightness: 80.0,
    });
    if let Ok(entity) = camera.get_single() {
        commands.entity(entity).insert(DistanceFog {
            color: night,
            falloff: FogFalloff::Linear {
                start: 10.0,
                end: 80.0,
            },
            ..default()
        });
    }

    // Moonlight, cold and steep, the only shadow caster besides the lamps.
    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(128, 144, 160),
            illuminance: 2_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-15.0, 30.0, -15.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Street, walls, windows, drain grates, puddles.
fn spawn_street(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<EffectsRng>,
) {
    let asphalt = materials.add(StandardMaterial {
        base_color: Color::srgb(0.055, 0.051, 0.047),
        metallic: 0.95,
        perceptual_roughness: 0.15,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::new(10.0, 50.0)))),
        MeshMaterial3d(asphalt),
        Transform::IDENTITY,
    ));

    let wall = materials.add(StandardMaterial {
        base_color: Color::srgb(0.067, 0.067, 0.067),
        metallic: 0.95,
        perceptual_roughness: 0.15,
        ..default()
    });
    let wall_mesh = meshes.add(Cuboid::new(1.0, 10.0, 100.0));
    for x in [-10.5, 10.5] {
        commands.spawn((
            Mesh3d(wall_mesh.clone()),
            MeshMaterial3d(wall.clone()),
            Transform::from_xyz(x, 5.0, 0.0),
        ));
    }

    // Lit windows along both walls.
    let window = materials.add(StandardMaterial {
        base_color: Color::srgb(0.53, 0.53, 0.53),
        emissive: LinearRgba::rgb(0.27, 0.27, 0.27) * 0.5,
        metallic: 0.8,
        perceptual_roughness: 0.2,
        ..default()
    });
    let window_mesh = meshes.add(Cuboid::new(0.05, 2.0, 1.5));
    for z in [-20.0, -10.0, 0.0, 10.0, 20.0] {
        for x in [-10.0, 10.0] {
            commands.spawn((
                Mesh3d(window_mesh.clone()),
                MeshMaterial3d(window.clone()),
                Transform::from_xyz(x, 6.0, z),
            ));
        }
    }

    // Drain grates.
    let grate = materials.add(StandardMaterial {
        base_color: Color::srgb(0.27, 0.27, 0.27),
        metallic: 0.9,
        perceptual_roughness: 0.8,
        ..default()
    });
    let grate_mesh = meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(0.75)));
    for (x, z) in [(-6.0, -10.0), (6.0, 12.0)] {
        commands.spawn((
            Mesh3d(grate_mesh.clone()),
            MeshMaterial3d(grate.clone()),
            Transform::from_xyz(x, 0.02, z),
        ));
    }

    rain_render::spawn_puddles(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut rng.0,
        &[
            Vec3::new(-3.0, 0.01, -15.0),
            Vec3::new(3.0, 0.01, 15.0),
            Vec3::new(0.0, 0.01, 5.0),
            Vec3::new(5.0, 0.01, -5.0),
            Vec3::new(-5.0, 0.01, 0.0),
            Vec3::new(7.0, 0.01, -18.0),
        ],
    );
}

/// Street lamps, the two neon signs, and the thunder flash rig.
fn spawn_lighting(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<EffectsRng>,
) {
    for (x, z) in [(-5.0, -15.0), (5.0, 15.0)] {
        spawn_street_lamp(&mut commands, &mut meshes, &mut materials, x, 10.0, z);
    }

    // Signs start at random phases so they never flicker in lockstep.
    neon_render::spawn_neon_sign(
        &mut commands,
        &mut meshes,
        &mut materials,
        Vec3::new(7.0, 6.0, -10.0),
        Color::srgb(0.0, 1.0, 1.0),
        250.0,
        10.0,
        rng.0.gen::<f32>() * 100.0,
    );
    neon_render::spawn_neon_sign(
        &mut commands,
        &mut meshes,
        &mut materials,
        Vec3::new(-7.0, 6.0, 10.0),
        Color::srgb_u8(255, 26, 117),
        250.0,
        10.0,
        rng.0.gen::<f32>() * 100.0,
    );

    thunder_render::spawn_thunder_rig(&mut commands, &mut meshes, &mut materials);
}

fn spawn_street_lamp(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    x: f32,
    height: f32,
    z: f32,
) {
    let warm = Color::srgb_u8(255, 214, 165);

    commands.spawn((
        SpotLight {
            color: warm,
            intensity: 1_500_000.0,
            range: 50.0,
            inner_angle: std::f32::consts::PI / 10.0,
            outer_angle: std::f32::consts::PI / 7.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(x, height, z).looking_at(Vec3::new(x, 0.0, z), Vec3::Z),
    ));

    // Soft glow right under the lamp head.
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(255, 183, 116),
            intensity: 30_000.0,
            range: 8.0,
            ..default()
        },
        Transform::from_xyz(x, height - 0.5, z),
    ));

    let post = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.2, 0.2),
        metallic: 0.5,
        perceptual_roughness: 0.7,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(0.2, height))),
        MeshMaterial3d(post),
        Transform::from_xyz(x, height / 2.0, z),
    ));

    let head = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.8, 0.8),
        emissive: warm.to_linear() * 5.0,
        metallic: 0.8,
        perceptual_roughness: 0.2,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.5))),
        MeshMaterial3d(head),
        Transform::from_xyz(x, height, z),
    ));
}

/// The figure walking up the street.
#[derive(Component)]
struct Walker;

fn spawn_walker_and_ambience(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        Walker,
        SceneRoot(assets::gltf_scene(&asset_server, "models/walker.glb")),
        Transform::from_xyz(0.0, 0.0, -80.0).with_scale(Vec3::splat(2.0)),
    ));

    audio::spawn_looping_ambience(&mut commands, &asset_server, "audio/rain.ogg");
}

fn walker_approach(time: Res<Time>, mut walkers: Query<&mut Transform, With<Walker>>) {
    for mut transform in &mut walkers {
        if transform.translation.z < WALKER_TARGET_Z {
            transform.translation.z =
                (transform.translation.z + WALKER_SPEED * time.delta_secs()).min(WALKER_TARGET_Z);
        }
    }
}
