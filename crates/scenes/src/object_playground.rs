//! A quiet gallery of primitives under plain daylight, each spinning on its
//! own axis. Mostly here to eyeball materials and the camera controls.

use bevy::prelude::*;

use rendering::camera::OrbitCamera;

pub struct ObjectPlaygroundPlugin;

impl Plugin for ObjectPlaygroundPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitCamera {
            focus: Vec3::new(0.0, 1.0, 0.0),
            yaw: 0.6,
            pitch: 0.4,
            distance: 14.0,
        })
        .add_systems(Startup, setup_playground)
        .add_systems(Update, spin_objects);
    }
}

/// Constant rotation about a fixed axis.
#[derive(Component)]
pub struct Spin {
    pub axis: Vec3,
    pub rate: f32,
}

fn setup_playground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ClearColor(Color::srgb(0.85, 0.88, 0.92)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(20.0)))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.55, 0.55, 0.58),
            perceptual_roughness: 0.9,
            ..default()
        })),
    ));

    let matte = |color: Color| StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.7,
        ..default()
    };

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.5, 1.5, 1.5))),
        MeshMaterial3d(materials.add(matte(Color::srgb(0.8, 0.2, 0.2)))),
        Transform::from_xyz(-6.0, 0.75, 0.0),
        Spin { axis: Vec3::Y, rate: 0.6 },
    ));
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.5, 0.9),
            metallic: 0.8,
            perceptual_roughness: 0.25,
            ..default()
        })),
        Transform::from_xyz(-3.0, 1.0, 0.0),
        Spin { axis: Vec3::X, rate: 0.4 },
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(0.7, 2.0))),
        MeshMaterial3d(materials.add(matte(Color::srgb(0.2, 0.7, 0.35)))),
        Transform::from_xyz(0.0, 1.0, 0.0),
        Spin { axis: Vec3::Z, rate: 0.5 },
    ));
    commands.spawn((
        Mesh3d(meshes.add(Torus {
            minor_radius: 0.3,
            major_radius: 1.0,
        })),
        MeshMaterial3d(materials.add(matte(Color::srgb(0.9, 0.6, 0.1)))),
        Transform::from_xyz(3.0, 1.3, 0.0),
        Spin { axis: Vec3::new(1.0, 1.0, 0.0).normalize(), rate: 0.8 },
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cone {
            radius: 0.9,
            height: 1.8,
        })),
        MeshMaterial3d(materials.add(matte(Color::srgb(0.6, 0.3, 0.8)))),
        Transform::from_xyz(6.0, 0.9, 0.0),
        Spin { axis: Vec3::Y, rate: 1.2 },
    ));
    // Unlit reference object; ignores the lights entirely.
    commands.spawn((
        Mesh3d(meshes.add(Capsule3d::new(0.5, 1.2))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.85, 0.2),
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 1.1, -4.0),
        Spin { axis: Vec3::Y, rate: 0.3 },
    ));
}

pub fn spin_objects(time: Res<Time>, mut spinners: Query<(&Spin, &mut Transform)>) {
    for (spin, mut transform) in &mut spinners {
        transform.rotate(Quat::from_axis_angle(spin.axis, spin.rate * time.delta_secs()));
    }
}
