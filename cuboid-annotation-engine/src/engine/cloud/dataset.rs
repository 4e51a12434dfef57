use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Point cloud dataset as a Bevy asset. Mirrors the JSON payload exactly:
/// an ordered sequence of raw dataset-space positions. Decoding is the
/// asset server's job; the store applies the axis realignment afterwards.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath)]
pub struct PointCloudDataset {
    pub points: Vec<[f32; 3]>,
}

impl PointCloudDataset {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_ordered_point_sequence() {
        let payload = r#"{ "points": [[0.0, 0.0, 0.0], [1.5, -2.0, 3.25]] }"#;
        let dataset: PointCloudDataset = serde_json::from_str(payload).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.points[1], [1.5, -2.0, 3.25]);
    }
}
