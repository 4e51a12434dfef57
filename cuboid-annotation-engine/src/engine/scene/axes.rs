use bevy::prelude::*;

use constants::render_settings::AXES_GIZMO_LENGTH;

/// World axes helper at the origin for orientation while annotating
pub fn draw_world_axes(mut gizmos: Gizmos) {
    let len = AXES_GIZMO_LENGTH;
    gizmos.line(Vec3::ZERO, Vec3::X * len, Color::srgb(1.0, 0.2, 0.2));
    gizmos.line(Vec3::ZERO, Vec3::Y * len, Color::srgb(0.2, 1.0, 0.2));
    gizmos.line(Vec3::ZERO, Vec3::Z * len, Color::srgb(0.2, 0.4, 1.0));
}
