use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use constants::render_settings::{
    CAMERA_FOCUS_OFFSET, CAMERA_INITIAL_POSITION, CAMERA_MAX_DISTANCE, CAMERA_MAX_PITCH,
    CAMERA_MIN_DISTANCE,
};

/// Orbit navigation state. The interaction coordinator flips `enabled` off
/// for the duration of a cuboid drag so box movement and camera movement
/// never fight over the same mouse motion.
#[derive(Resource)]
pub struct OrbitCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub enabled: bool,
    /// Set by the wheel-rotation tool when the scroll wheel is manipulating
    /// the selected cuboid instead of the dolly.
    pub lock_zoom_this_frame: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let offset = CAMERA_INITIAL_POSITION;
        let distance = offset.length();
        Self {
            focus_point: Vec3::ZERO,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            enabled: true,
            lock_zoom_this_frame: false,
        }
    }
}

impl OrbitCamera {
    /// Frame a target point: yaw, pitch and distance are derived from the
    /// fixed focus offset, so the eye eases towards
    /// `target + CAMERA_FOCUS_OFFSET` looking back at the target.
    pub fn focus_on(&mut self, target: Vec3) {
        let offset = CAMERA_FOCUS_OFFSET;
        let distance = offset.length();
        self.focus_point = target;
        self.distance = distance;
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / distance).asin();
    }

    fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0)
    }

    fn eye_position(&self) -> Vec3 {
        self.focus_point + self.rotation() * Vec3::new(0.0, 0.0, self.distance)
    }
}

/// Apply mouse orbit and dolly input to the orbit state
pub fn camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    if orbit.enabled && mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        let yaw_sens = 0.0035;
        let pitch_sens = 0.0030;
        orbit.yaw -= mouse_delta.x * yaw_sens;
        orbit.pitch += mouse_delta.y * pitch_sens;
        // Polar angle capped at the horizon, matching the editor's orbit limits.
        orbit.pitch = orbit.pitch.clamp(0.0, CAMERA_MAX_PITCH);
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    if orbit.lock_zoom_this_frame {
        // Wheel input was consumed by the cuboid rotation this frame.
        orbit.lock_zoom_this_frame = false;
    } else if scroll_accum.abs() > f32::EPSILON {
        let dolly_speed = (orbit.distance * 0.1).clamp(0.5, 50.0);
        orbit.distance = (orbit.distance - scroll_accum * dolly_speed)
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }
}

/// One toggle key cycles the projection mode; annotation state is untouched.
pub fn toggle_projection_mode(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cameras: Query<&mut Projection, With<Camera3d>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyO) {
        return;
    }

    for mut projection in &mut cameras {
        *projection = match *projection {
            Projection::Perspective(_) => {
                info!("camera projection: orthographic");
                Projection::Orthographic(OrthographicProjection {
                    scaling_mode: ScalingMode::FixedVertical {
                        viewport_height: 100.0,
                    },
                    ..OrthographicProjection::default_3d()
                })
            }
            _ => {
                info!("camera projection: perspective");
                Projection::Perspective(PerspectiveProjection {
                    fov: 75.0_f32.to_radians(),
                    near: 0.10,
                    far: 300.0,
                    ..default()
                })
            }
        };
    }
}

/// Ease the camera transform towards the orbit state
pub fn sync_camera_transform(
    orbit: Res<OrbitCamera>,
    time: Res<Time>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };

    let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
    let target = Transform::from_translation(orbit.eye_position())
        .looking_at(orbit.focus_point, Vec3::Y);

    transform.translation = transform.translation.lerp(target.translation, lerp_speed);
    transform.rotation = transform.rotation.slerp(target.rotation, lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_on_places_the_eye_at_the_fixed_offset() {
        let mut orbit = OrbitCamera::default();
        let target = Vec3::new(10.0, 2.0, -4.0);
        orbit.focus_on(target);

        // Direction and distance of the offset both survive the refocus.
        let expected = target + CAMERA_FOCUS_OFFSET;
        assert!(orbit.eye_position().distance(expected) < 1e-4);
        assert_eq!(orbit.focus_point, target);
    }

    #[test]
    fn default_orbit_reproduces_the_initial_camera_position() {
        let orbit = OrbitCamera::default();
        assert!(orbit.eye_position().distance(CAMERA_INITIAL_POSITION) < 1e-3);
    }
}
