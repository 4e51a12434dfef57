use bevy::prelude::*;

use super::registry::CuboidTransform;

/// Ray vs oriented cuboid: transform the ray into box-local space and run
/// the slab test against the half-extents. Used for pick/hover only; the
/// containment classifier works on the axis-aligned enclosing volume.
pub fn ray_hits_cuboid(origin: Vec3, dir: Vec3, transform: &CuboidTransform) -> Option<f32> {
    let inv_rotation = transform.rotation_quat().inverse();
    let o_local = inv_rotation * (origin - transform.center);
    let d_local = inv_rotation * dir;
    let he = transform.scale * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax { std::mem::swap(&mut tmin, &mut tmax); }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax { std::mem::swap(&mut tymin, &mut tymax); }

    if (tmin > tymax) || (tymin > tmax) { return None; }
    if tymin > tmin { tmin = tymin; }
    if tymax < tmax { tmax = tymax; }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax { std::mem::swap(&mut tzmin, &mut tzmax); }

    if (tmin > tzmax) || (tzmin > tmax) { return None; }
    if tzmin > tmin { tmin = tzmin; }
    if tzmax < tmax { tmax = tzmax; }

    if tmax < 0.0 { return None; }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Ray vs horizontal plane `y = height`, used to slide a dragged cuboid.
pub fn ray_hits_ground_plane(origin: Vec3, dir: Vec3, height: f32) -> Option<Vec3> {
    if dir.y.abs() < f32::EPSILON {
        return None;
    }
    let t = (height - origin.y) / dir.y;
    (t > 0.0).then(|| origin + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_through_center_hits_unit_cuboid() {
        let transform = CuboidTransform::default();
        let t = ray_hits_cuboid(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &transform);
        assert!(t.is_some());
        assert!((t.unwrap() - 4.5).abs() < 1e-5);
    }

    #[test]
    fn ray_past_the_box_misses() {
        let transform = CuboidTransform::default();
        assert!(ray_hits_cuboid(Vec3::new(2.0, 0.0, -5.0), Vec3::Z, &transform).is_none());
    }

    #[test]
    fn rotated_box_is_picked_in_its_oriented_frame() {
        let mut transform = CuboidTransform::default();
        transform.rotation = Vec3::new(0.0, std::f32::consts::FRAC_PI_4, 0.0);

        // Just outside the oriented box near the AABB corner.
        let origin = Vec3::new(0.65, 10.0, 0.65);
        assert!(ray_hits_cuboid(origin, Vec3::NEG_Y, &transform).is_none());

        // Straight down through the center still hits.
        assert!(ray_hits_cuboid(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, &transform).is_some());
    }

    #[test]
    fn ground_plane_intersection() {
        let hit = ray_hits_ground_plane(Vec3::new(1.0, 4.0, 1.0), Vec3::NEG_Y, 2.0).unwrap();
        assert_eq!(hit, Vec3::new(1.0, 2.0, 1.0));
        assert!(ray_hits_ground_plane(Vec3::ZERO, Vec3::X, 2.0).is_none());
    }
}
