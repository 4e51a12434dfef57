use bevy::color::{Color, Srgba};
use bevy::math::Vec3;

/// Colour written to every point outside the active cuboid (and at load time).
pub const DEFAULT_POINT_COLOUR: [u8; 3] = [25, 255, 255];
/// Colour written to points enclosed by the active cuboid's world volume.
pub const CONTAINED_POINT_COLOUR: [u8; 3] = [255, 255, 25];

pub const CUBOID_BASE_TINT: Color = Color::Srgba(Srgba {
    red: 1.0,
    green: 1.0,
    blue: 1.0,
    alpha: 1.0,
});
pub const CUBOID_SELECTED_TINT: Color = Color::Srgba(Srgba {
    red: 0.2,
    green: 1.0,
    blue: 1.0,
    alpha: 1.0,
});
pub const CUBOID_HOVER_TINT: Color = Color::Srgba(Srgba {
    red: 1.0,
    green: 0.8,
    blue: 0.2,
    alpha: 1.0,
});

pub const CUBOID_BASE_OPACITY: f32 = 0.3;
pub const CUBOID_SELECTED_OPACITY: f32 = 0.6;

pub const CAMERA_INITIAL_POSITION: Vec3 = Vec3::new(50.0, 50.0, -100.0);
pub const CAMERA_MIN_DISTANCE: f32 = 1.0;
pub const CAMERA_MAX_DISTANCE: f32 = 500.0;
pub const CAMERA_MAX_PITCH: f32 = 1.55;
/// Offset applied when refocusing the camera on a cuboid picked from the panel.
pub const CAMERA_FOCUS_OFFSET: Vec3 = Vec3::new(5.0, 5.0, 5.0);

pub const PANEL_WIDTH: f32 = 280.0;

/// Settling delay applied around dataset loading so the progress overlay
/// does not pop in and out on fast transports.
pub const LOAD_SETTLE_SECS: f32 = 0.25;

pub const AXES_GIZMO_LENGTH: f32 = 1.0;
