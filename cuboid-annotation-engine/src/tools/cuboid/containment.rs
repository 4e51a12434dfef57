use bevy::prelude::*;

use constants::render_settings::{CONTAINED_POINT_COLOUR, DEFAULT_POINT_COLOUR};

use crate::engine::cloud::store::{PointCloudStore, StoreError};

use super::registry::{Cuboid, CuboidTransform};

/// Axis-aligned world-space volume enclosing the (possibly rotated) box:
/// the eight half-extent corners rotated and translated, then min/maxed.
/// Deliberately conservative relative to the visible oriented wireframe.
pub fn world_aabb(transform: &CuboidTransform) -> (Vec3, Vec3) {
    let half = transform.scale * 0.5;
    let rotation = transform.rotation_quat();

    let mut min = Vec3::INFINITY;
    let mut max = Vec3::NEG_INFINITY;
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                let corner =
                    transform.center + rotation * (Vec3::new(sx, sy, sz) * half);
                min = min.min(corner);
                max = max.max(corner);
            }
        }
    }
    (min, max)
}

/// Full O(N) pass over the cloud: every point gets exactly one of two
/// colours depending on membership in the box's enclosing world volume.
/// Boundary ties count as contained. A box with any zero scale axis is
/// degenerate and contains nothing. Invoked only on discrete commit
/// moments (drag ticks, property commits), never per render frame.
pub fn classify(store: &mut PointCloudStore, cuboid: &Cuboid) -> Result<(), StoreError> {
    if cuboid.transform.scale.min_element() <= 0.0 {
        for index in 0..store.len() {
            store.set_colour(index, DEFAULT_POINT_COLOUR)?;
        }
        return Ok(());
    }

    let (min, max) = world_aabb(&cuboid.transform);
    for index in 0..store.len() {
        let p = store.position(index);
        let inside = p.cmpge(min).all() && p.cmple(max).all();
        let colour = if inside {
            CONTAINED_POINT_COLOUR
        } else {
            DEFAULT_POINT_COLOUR
        };
        store.set_colour(index, colour)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::cuboid::registry::CuboidRegistry;

    fn unit_cuboid() -> Cuboid {
        CuboidRegistry::default().create().clone()
    }

    fn contained_count(store: &PointCloudStore) -> usize {
        store
            .colours()
            .iter()
            .filter(|c| **c == CONTAINED_POINT_COLOUR)
            .count()
    }

    #[test]
    fn every_point_gets_exactly_one_of_two_colours() {
        let mut store = PointCloudStore::from_raw_points(
            (0..50).map(|i| [i as f32 * 0.1, 0.0, 0.0]),
        );
        let cuboid = unit_cuboid();

        classify(&mut store, &cuboid).unwrap();
        assert!(store
            .colours()
            .iter()
            .all(|c| *c == CONTAINED_POINT_COLOUR || *c == DEFAULT_POINT_COLOUR));
    }

    #[test]
    fn recompute_with_unchanged_box_is_idempotent() {
        let mut store = PointCloudStore::from_raw_points(
            (0..20).map(|i| [i as f32 * 0.3 - 3.0, 0.2, -0.1]),
        );
        let cuboid = unit_cuboid();

        classify(&mut store, &cuboid).unwrap();
        let first: Vec<[u8; 3]> = store.colours().to_vec();
        classify(&mut store, &cuboid).unwrap();
        assert_eq!(store.colours(), &first[..]);
    }

    #[test]
    fn origin_point_tracks_the_box_as_it_moves() {
        // One raw point at the dataset origin stays at the world origin.
        let mut store = PointCloudStore::from_raw_points(vec![[0.0, 0.0, 0.0]]);
        let mut cuboid = unit_cuboid();

        classify(&mut store, &cuboid).unwrap();
        assert_eq!(store.colours()[0], CONTAINED_POINT_COLOUR);

        cuboid.transform.center = Vec3::splat(100.0);
        classify(&mut store, &cuboid).unwrap();
        assert_eq!(store.colours()[0], DEFAULT_POINT_COLOUR);
    }

    #[test]
    fn axis_realignment_and_box_frame_agree() {
        // Raw (1, 2, 3) lands at world (−1, 3, 2); a unit box centered
        // there must contain it. A box at raw-space (1, 2, 3) must not.
        let mut store = PointCloudStore::from_raw_points(vec![[1.0, 2.0, 3.0]]);
        let mut cuboid = unit_cuboid();

        cuboid.transform.center = Vec3::new(-1.0, 3.0, 2.0);
        classify(&mut store, &cuboid).unwrap();
        assert_eq!(store.colours()[0], CONTAINED_POINT_COLOUR);

        cuboid.transform.center = Vec3::new(1.0, 2.0, 3.0);
        classify(&mut store, &cuboid).unwrap();
        assert_eq!(store.colours()[0], DEFAULT_POINT_COLOUR);
    }

    #[test]
    fn enclosing_box_contains_everything_distant_box_nothing() {
        let mut store = PointCloudStore::from_raw_points(
            (0..64).map(|i| [(i % 8) as f32, (i / 8) as f32, (i % 3) as f32]),
        );
        let mut cuboid = unit_cuboid();

        let (min, max) = store.world_bounds().unwrap();
        cuboid.transform.center = (min + max) / 2.0;
        cuboid.transform.scale = (max - min) + Vec3::ONE;
        classify(&mut store, &cuboid).unwrap();
        assert_eq!(contained_count(&store), store.len());

        cuboid.transform.center = max + Vec3::splat(1000.0);
        classify(&mut store, &cuboid).unwrap();
        assert_eq!(contained_count(&store), 0);
    }

    #[test]
    fn boundary_points_are_contained() {
        // Unit box spans [-0.5, 0.5] per axis; a point exactly on the max
        // face is a tie and ties belong to "contained".
        let mut store = PointCloudStore::from_raw_points(vec![[-0.5, 0.5, 0.5]]);
        let cuboid = unit_cuboid();

        assert_eq!(store.position(0), Vec3::new(0.5, 0.5, 0.5));
        classify(&mut store, &cuboid).unwrap();
        assert_eq!(store.colours()[0], CONTAINED_POINT_COLOUR);
    }

    #[test]
    fn zero_scale_axis_contains_nothing() {
        let mut store = PointCloudStore::from_raw_points(vec![[0.0, 0.0, 0.0]]);
        let mut cuboid = unit_cuboid();
        cuboid.transform.scale = Vec3::new(1.0, 0.0, 1.0);

        classify(&mut store, &cuboid).unwrap();
        assert_eq!(contained_count(&store), 0);
    }

    #[test]
    fn rotated_box_uses_the_conservative_enclosing_volume() {
        let mut cuboid = unit_cuboid();
        cuboid.transform.rotation = Vec3::new(0.0, std::f32::consts::FRAC_PI_4, 0.0);

        // A 45° yaw grows the enclosing AABB to ±√2/2 in x and z.
        let (min, max) = world_aabb(&cuboid.transform);
        let half_diag = std::f32::consts::SQRT_2 / 2.0;
        assert!((max.x - half_diag).abs() < 1e-5);
        assert!((min.z + half_diag).abs() < 1e-5);
        assert!((max.y - 0.5).abs() < 1e-5);

        // World (0.65, 0, 0.65) is outside the oriented box (local x ≈ 0.92)
        // but inside the enclosing volume: the preserved conservative test
        // counts it as contained.
        let mut store = PointCloudStore::from_raw_points(vec![[-0.65, 0.65, 0.0]]);
        assert_eq!(store.position(0), Vec3::new(0.65, 0.0, 0.65));
        classify(&mut store, &cuboid).unwrap();
        assert_eq!(store.colours()[0], CONTAINED_POINT_COLOUR);
    }
}
