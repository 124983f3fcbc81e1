//! Thunder flash rendering: an overhead sky light plus a large horizontal
//! flash plane whose opacity spikes during a strike. Both read their values
//! from [`ThunderState`] each frame; the state machine itself lives in the
//! effects crate.

use bevy::prelude::*;

use effects::thunder::ThunderState;

/// Abstract thunder intensity units → directional-light lux.
const THUNDER_LUX_PER_UNIT: f32 = 400.0;

/// Marker for the thunder sky light.
#[derive(Component)]
pub struct ThunderLight;

/// Marker for the flash plane.
#[derive(Component)]
pub struct FlashPlane;

/// Spawn the flash rig: sky light (off while idle) and invisible flash plane.
pub fn spawn_thunder_rig(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        ThunderLight,
        DirectionalLight {
            color: Color::srgb(0.8, 0.87, 1.0),
            illuminance: 0.0,
            ..default()
        },
        Transform::from_xyz(0.0, 50.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    let flash_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.0),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    commands.spawn((
        FlashPlane,
        Mesh3d(meshes.add(Plane3d::new(Vec3::NEG_Y, Vec2::splat(150.0)))),
        MeshMaterial3d(flash_material),
        Transform::from_xyz(0.0, 20.0, 0.0),
    ));
}

/// System: apply the current flash values to the rig. No-op without a rig.
pub fn apply_thunder(
    state: Res<ThunderState>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut lights: Query<&mut DirectionalLight, With<ThunderLight>>,
    planes: Query<&MeshMaterial3d<StandardMaterial>, With<FlashPlane>>,
) {
    for mut light in &mut lights {
        light.illuminance = state.light_intensity * THUNDER_LUX_PER_UNIT;
    }
    for material_handle in &planes {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color.set_alpha(state.flash_opacity);
        }
    }
}
