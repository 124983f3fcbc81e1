use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

const PAN_SPEED: f32 = 12.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 120.0;
const MIN_PITCH: f32 = -20.0 * std::f32::consts::PI / 180.0; // look slightly up
const MAX_PITCH: f32 = 85.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Exponential ease rate for preset moves; higher = snappier.
const PRESET_EASE_RATE: f32 = 4.0;

/// Orbital camera model: camera orbits around a focus point.
#[derive(Resource)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 20.0_f32.to_radians(),
            distance: 10.0,
        }
    }
}

/// A camera pose the orbit camera eases toward (UI presets: front/top/side).
/// Any manual orbit input deactivates the move.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraTarget {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub active: bool,
}

impl Default for CameraTarget {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 20.0_f32.to_radians(),
            distance: 10.0,
            active: false,
        }
    }
}

impl CameraTarget {
    /// Ease toward this pose from wherever the camera currently is.
    pub fn set(&mut self, focus: Vec3, yaw: f32, pitch: f32, distance: f32) {
        self.focus = focus;
        self.yaw = yaw;
        self.pitch = pitch;
        self.distance = distance;
        self.active = true;
    }
}

pub fn setup_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    let (pos, look_at) = orbit_to_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: 70.0_f32.to_radians(),
            ..default()
        }),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
}

/// Wrap an angle difference into (-PI, PI] so easing takes the shortest arc
/// instead of unwinding accumulated revolutions.
fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    // Spherical to cartesian offset from focus
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    let pos = orbit.focus + Vec3::new(x, y, z);
    (pos, orbit.focus)
}

/// System: apply OrbitCamera state to the actual camera Transform each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit_to_transform(&orbit);
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// Right-drag: orbit around the focus point.
pub fn camera_orbit_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut orbit: ResMut<OrbitCamera>,
    mut target: ResMut<CameraTarget>,
) {
    if !buttons.pressed(MouseButton::Right) {
        motion.clear();
        return;
    }
    let mut delta = Vec2::ZERO;
    for event in motion.read() {
        delta += event.delta;
    }
    if delta != Vec2::ZERO {
        target.active = false;
        orbit.yaw -= delta.x * ORBIT_SENSITIVITY;
        orbit.pitch = (orbit.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }
}

/// Scroll wheel: zoom toward/away from the focus point.
pub fn camera_zoom_scroll(
    mut wheel: EventReader<MouseWheel>,
    mut orbit: ResMut<OrbitCamera>,
    mut target: ResMut<CameraTarget>,
) {
    for event in wheel.read() {
        let scroll = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 100.0,
        };
        if scroll != 0.0 {
            target.active = false;
            orbit.distance =
                (orbit.distance * (1.0 - scroll * ZOOM_SPEED)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }
}

/// WASD/Arrow keys: pan focus along the ground plane (direction relative to
/// current yaw).
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
    mut target: ResMut<CameraTarget>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        target.active = false;
        let dir = dir.normalize();
        let scale = orbit.distance / 10.0;
        let delta = PAN_SPEED * scale * time.delta_secs();
        // Rotate movement direction by current yaw
        let cos_yaw = orbit.yaw.cos();
        let sin_yaw = orbit.yaw.sin();
        let world_x = dir.x * cos_yaw + dir.y * sin_yaw;
        let world_z = -dir.x * sin_yaw + dir.y * cos_yaw;
        orbit.focus.x += world_x * delta;
        orbit.focus.z += world_z * delta;
    }
}

/// Ease the orbit camera toward an active [`CameraTarget`].
pub fn camera_preset_ease(
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
    mut target: ResMut<CameraTarget>,
) {
    if !target.active {
        return;
    }
    let t = 1.0 - (-PRESET_EASE_RATE * time.delta_secs()).exp();
    orbit.focus = orbit.focus.lerp(target.focus, t);
    orbit.yaw += wrap_angle(target.yaw - orbit.yaw) * t;
    orbit.pitch += (target.pitch - orbit.pitch) * t;
    orbit.distance += (target.distance - orbit.distance) * t;

    let close = wrap_angle(target.yaw - orbit.yaw).abs() < 1e-3
        && (orbit.pitch - target.pitch).abs() < 1e-3
        && (orbit.distance - target.distance).abs() < 1e-2
        && orbit.focus.distance(target.focus) < 1e-2;
    if close {
        orbit.focus = target.focus;
        orbit.yaw = target.yaw;
        orbit.pitch = target.pitch;
        orbit.distance = target.distance;
        target.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_transform_distance() {
        let orbit = OrbitCamera {
            focus: Vec3::new(1.0, 2.0, 3.0),
            yaw: 0.7,
            pitch: 0.4,
            distance: 25.0,
        };
        let (pos, look_at) = orbit_to_transform(&orbit);
        assert_eq!(look_at, orbit.focus);
        assert!((pos.distance(orbit.focus) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_angle_shortest_arc() {
        use std::f32::consts::{PI, TAU};
        assert!((wrap_angle(0.1) - 0.1).abs() < 1e-6);
        assert!((wrap_angle(-0.1) + 0.1).abs() < 1e-6);
        assert!((wrap_angle(TAU * 20.0 + 0.1) - 0.1).abs() < 1e-3);
        // Just past the half turn wraps to the negative side.
        assert!((wrap_angle(PI + 0.1) + (PI - 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_preset_ease_ignores_accumulated_revolutions() {
        // A scene that spins the camera leaves yaw hundreds of radians out;
        // easing must close the wrapped error, not unwind every revolution.
        use std::f32::consts::TAU;
        let start = TAU * 50.0 + 0.4;
        let target_yaw = 0.5_f32;
        let mut yaw = start;
        // Per-frame blend factor at 60 FPS.
        let t = 1.0 - (-PRESET_EASE_RATE / 60.0).exp();
        for _ in 0..200 {
            yaw += wrap_angle(target_yaw - yaw) * t;
        }
        assert!(wrap_angle(target_yaw - yaw).abs() < 1e-3);
        assert!((yaw - start).abs() < 1.0);
    }

    #[test]
    fn test_camera_target_set_activates() {
        let mut target = CameraTarget::default();
        assert!(!target.active);
        target.set(Vec3::ZERO, 1.0, 0.5, 8.0);
        assert!(target.active);
        assert_eq!(target.distance, 8.0);
    }
}
