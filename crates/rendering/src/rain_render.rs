//! Rain droplet rendering.
//!
//! The effects crate owns the drop positions ([`RainState`]); this module
//! spawns one thin stretched cuboid per drop (shared mesh and material) and
//! copies the pool positions into the droplet transforms every frame.

use bevy::prelude::*;
use rand::Rng;

use effects::config::EffectsSettings;
use effects::rain::RainState;
use effects::rng::EffectsRng;

/// Marker for droplet entities, carrying the drop's index into the pool.
#[derive(Component)]
pub struct RainDrop(pub usize);

/// Startup system for rainy scenes: builds the pool from the active settings,
/// spawns the droplet entities, and inserts [`RainState`] as a resource.
pub fn spawn_rain(
    mut commands: Commands,
    settings: Res<EffectsSettings>,
    mut rng: ResMut<EffectsRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let rain = RainState::new(settings.rain, &mut rng.0);

    // All drops share one mesh and one material; only transforms differ.
    let mesh = meshes.add(Cuboid::new(0.02, 0.45, 0.02));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.67, 0.67, 0.67),
        unlit: true,
        ..default()
    });

    for (index, position) in rain.positions().iter().enumerate() {
        commands.spawn((
            RainDrop(index),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(*position),
        ));
    }

    info!("rain pool: {} drops", rain.len());
    commands.insert_resource(rain);
}

/// System: copy pool positions into droplet transforms. No-op without rain.
pub fn sync_rain_transforms(
    rain: Option<Res<RainState>>,
    mut drops: Query<(&RainDrop, &mut Transform)>,
) {
    let Some(rain) = rain else {
        return;
    };
    let positions = rain.positions();
    for (drop, mut transform) in &mut drops {
        if let Some(position) = positions.get(drop.0) {
            transform.translation = *position;
        }
    }
}

/// Reusable puddle spawner for wet scenes: flat, highly reflective discs.
pub fn spawn_puddles(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
    spots: &[Vec3],
) {
    let mesh = meshes.add(Circle::new(2.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.2, 0.2),
        perceptual_roughness: 0.1,
        metallic: 0.9,
        ..default()
    });

    for spot in spots {
        let scale = 0.8 + rng.gen::<f32>() * 0.5;
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(*spot)
                .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
                .with_scale(Vec3::new(scale, scale, 1.0)),
        ));
    }
}
