use bevy::prelude::*;

use constants::coordinate_system::dataset_to_world;
use constants::render_settings::DEFAULT_POINT_COLOUR;

/// Internal-misuse errors raised by the store. These never surface to a
/// user; callers iterating against `len()` cannot trigger them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    InvalidIndex { index: usize, len: usize },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::InvalidIndex { index, len } => {
                write!(f, "point index {index} out of range (cloud has {len} points)")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// One loaded dataset: immutable positions plus a mutable per-point colour
/// buffer. Positions are axis-realigned once at ingest, so everything
/// downstream (cuboid transforms, the containment test) works in a single
/// Y-up world frame. Invariant: `colours.len() == positions.len()`.
pub struct PointCloudStore {
    positions: Vec<Vec3>,
    colours: Vec<[u8; 3]>,
}

impl PointCloudStore {
    /// Build a store from raw dataset positions, applying the fixed
    /// orientation correction and the uniform default colouring.
    pub fn from_raw_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = [f32; 3]>,
    {
        let positions: Vec<Vec3> = points
            .into_iter()
            .map(|p| Vec3::from_array(dataset_to_world(p)))
            .collect();
        let colours = vec![DEFAULT_POINT_COLOUR; positions.len()];
        Self { positions, colours }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// World-space position of one point. Callers index against `len()`.
    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colours(&self) -> &[[u8; 3]] {
        &self.colours
    }

    /// Bounds-checked colour write.
    pub fn set_colour(&mut self, index: usize, rgb: [u8; 3]) -> Result<(), StoreError> {
        let len = self.colours.len();
        match self.colours.get_mut(index) {
            Some(slot) => {
                *slot = rgb;
                Ok(())
            }
            None => Err(StoreError::InvalidIndex { index, len }),
        }
    }

    /// Axis-aligned extent of the whole cloud, `None` when empty.
    pub fn world_bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions {
            min = min.min(*p);
            max = max.max(*p);
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::render_settings::CONTAINED_POINT_COLOUR;

    #[test]
    fn ingest_realigns_axes_and_defaults_colours() {
        let store = PointCloudStore::from_raw_points(vec![[1.0, 2.0, 3.0]]);

        // Raw (x, y, z) lands at world (−x, z, y).
        assert_eq!(store.position(0), Vec3::new(-1.0, 3.0, 2.0));
        assert_eq!(store.colours(), &[DEFAULT_POINT_COLOUR]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn colour_buffer_tracks_position_count() {
        let store =
            PointCloudStore::from_raw_points((0..17).map(|i| [i as f32, 0.0, 0.0]));
        assert_eq!(store.colours().len(), store.positions().len());
    }

    #[test]
    fn set_colour_is_bounds_checked() {
        let mut store = PointCloudStore::from_raw_points(vec![[0.0; 3], [0.0; 3]]);

        assert_eq!(store.set_colour(1, CONTAINED_POINT_COLOUR), Ok(()));
        assert_eq!(store.colours()[1], CONTAINED_POINT_COLOUR);

        assert_eq!(
            store.set_colour(2, CONTAINED_POINT_COLOUR),
            Err(StoreError::InvalidIndex { index: 2, len: 2 })
        );
    }

    #[test]
    fn world_bounds_cover_all_points() {
        let store = PointCloudStore::from_raw_points(vec![
            [1.0, 0.0, 0.0],
            [-2.0, 5.0, 1.0],
            [0.5, -1.0, 4.0],
        ]);
        let (min, max) = store.world_bounds().unwrap();
        for p in store.positions() {
            assert!(p.cmpge(min).all() && p.cmple(max).all());
        }
        assert_eq!(PointCloudStore::from_raw_points([]).world_bounds(), None);
    }
}
