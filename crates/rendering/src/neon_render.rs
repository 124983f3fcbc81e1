//! Neon sign rendering.
//!
//! A neon sign is a single entity: an emissive box mesh plus a `PointLight`,
//! with the flicker state computed by the effects crate. Each frame the
//! computed intensity is written to the light and the material emissive is
//! rescaled proportionally so the glow matches the cast light.

use bevy::prelude::*;

use effects::flicker::NeonFlicker;

/// Abstract flicker units → bevy point-light lumens.
const NEON_LUMENS_PER_UNIT: f32 = 10_000.0;

/// The sign's neon color, kept so the emissive can be rebuilt every frame.
#[derive(Component)]
pub struct NeonSign {
    pub color: Color,
}

/// Spawn a neon sign at `position`. `base_intensity`/`base_emissive` are the
/// steady-state values the flicker oscillates around.
pub fn spawn_neon_sign(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    color: Color,
    base_intensity: f32,
    base_emissive: f32,
    phase_offset: f32,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.07, 0.07, 0.07),
        emissive: color.to_linear() * base_emissive,
        metallic: 0.5,
        perceptual_roughness: 0.5,
        ..default()
    });

    commands.spawn((
        NeonSign { color },
        NeonFlicker::new(base_intensity, base_emissive, phase_offset),
        Mesh3d(meshes.add(Cuboid::new(3.0, 1.0, 0.2))),
        MeshMaterial3d(material),
        PointLight {
            color,
            intensity: base_intensity * NEON_LUMENS_PER_UNIT,
            range: 20.0,
            ..default()
        },
        Transform::from_translation(position),
    ));
}

/// System: push this frame's flicker outputs into the light and material.
pub fn apply_neon_flicker(
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut signs: Query<(
        &NeonFlicker,
        &NeonSign,
        &mut PointLight,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    for (flicker, sign, mut light, material_handle) in &mut signs {
        light.intensity = flicker.current_intensity * NEON_LUMENS_PER_UNIT;
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.emissive = sign.color.to_linear() * flicker.current_emissive;
        }
    }
}
