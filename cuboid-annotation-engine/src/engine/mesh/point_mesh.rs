use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_asset::RenderAssetUsages;

use crate::engine::cloud::loader::CloudAssets;
use crate::engine::cloud::store::PointCloudStore;

/// Create a point-list mesh carrying one vertex per cloud point, with the
/// colour buffer exposed as a normalised u8 vertex colour attribute.
pub fn create_point_mesh(store: &PointCloudStore) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        // Kept in the main world so colour updates can rewrite the attribute.
        RenderAssetUsages::default(),
    );

    let positions: Vec<[f32; 3]> = store.positions().iter().map(|p| p.to_array()).collect();
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(
        Mesh::ATTRIBUTE_COLOR,
        VertexAttributeValues::Unorm8x4(colour_rgba(store)),
    );
    mesh
}

fn colour_rgba(store: &PointCloudStore) -> Vec<[u8; 4]> {
    store
        .colours()
        .iter()
        .map(|[r, g, b]| [*r, *g, *b, 255])
        .collect()
}

/// Upload the store's colour buffer into the mesh after a classifier pass.
/// Runs only when a pass flagged the colours dirty, never per-frame work.
pub fn sync_point_colours(mut cloud: ResMut<CloudAssets>, mut meshes: ResMut<Assets<Mesh>>) {
    if !cloud.colours_dirty {
        return;
    }

    let rgba = match cloud.store.as_ref() {
        Some(store) => colour_rgba(store),
        None => return,
    };

    if let Some(mesh) = meshes.get_mut(&cloud.mesh) {
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_COLOR,
            VertexAttributeValues::Unorm8x4(rgba),
        );
        cloud.colours_dirty = false;
    }
}
