//! Glass orb under bloom. A transmissive sphere slowly rotates between two
//! sea-tinted directional lights; the HDR camera gets bloom and a filmic
//! tonemap bolted on after it spawns.

use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;

use rendering::camera::{setup_camera, OrbitCamera};

use crate::object_playground::Spin;

pub struct MirrorCubePlugin;

impl Plugin for MirrorCubePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitCamera {
            focus: Vec3::new(0.0, 1.5, 0.0),
            yaw: 0.8,
            pitch: 0.15,
            distance: 9.0,
        })
        .add_systems(
            Startup,
            (setup_mirror_scene, attach_bloom.after(setup_camera)),
        )
        .add_systems(Update, crate::object_playground::spin_objects);
    }
}

fn setup_mirror_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ClearColor(Color::srgb(0.01, 0.02, 0.02)));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.7, 1.0, 0.95),
        brightness: 80.0,
    });

    // lightseagreen / seagreen key and fill.
    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(0x20, 0xb2, 0xaa),
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 6.0, 4.0).looking_at(Vec3::new(0.0, 1.5, 0.0), Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            color: Color::srgb_u8(0x2e, 0x8b, 0x57),
            illuminance: 3_000.0,
            ..default()
        },
        Transform::from_xyz(-5.0, 3.0, -4.0).looking_at(Vec3::new(0.0, 1.5, 0.0), Vec3::Y),
    ));

    // Floor, so the transmission has something to refract.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(14.0)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.05, 0.1, 0.09),
            perceptual_roughness: 0.6,
            ..default()
        })),
        Transform::from_xyz(0.0, -1.0, 0.0),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            specular_transmission: 1.0,
            thickness: 1.8,
            ior: 1.45,
            perceptual_roughness: 0.05,
            clearcoat: 1.0,
            clearcoat_perceptual_roughness: 0.1,
            ..default()
        })),
        Transform::from_xyz(0.0, 1.5, 0.0).with_scale(Vec3::splat(2.5)),
        Spin {
            axis: Vec3::new(0.2, 1.0, 0.1).normalize(),
            rate: 0.25,
        },
    ));
}

fn attach_bloom(mut commands: Commands, cameras: Query<Entity, With<Camera3d>>) {
    for camera in &cameras {
        commands
            .entity(camera)
            .insert((Bloom::NATURAL, Tonemapping::TonyMcMapface));
    }
}
