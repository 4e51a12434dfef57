use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use super::dataset::PointCloudDataset;
use super::store::PointCloudStore;
use crate::engine::core::app_state::LoadingProgress;
use crate::engine::mesh::point_mesh::create_point_mesh;

pub const DATASET_PATH: &str = "datasets/sample.cloud.json";

/// Marker for the spawned point cloud entity.
#[derive(Component)]
pub struct PointCloud;

/// The loaded cloud and its render-side handles. `store` stays `None` until
/// the dataset resolves, and on load failure — the well-defined empty-cloud
/// state from which no classifier pass can run.
#[derive(Resource, Default)]
pub struct CloudAssets {
    pub store: Option<PointCloudStore>,
    pub mesh: Handle<Mesh>,
    pub cloud_entity: Option<Entity>,
    pub is_loaded: bool,
    /// Set after a classifier pass; the mesh sync system clears it.
    pub colours_dirty: bool,
}

#[derive(Resource, Default)]
pub struct DatasetLoader {
    handle: Option<Handle<PointCloudDataset>>,
}

/// Drive the single outstanding dataset request: kick off the load, advance
/// the progress fraction at the granularity the asset server reports, and
/// install the store plus its default colouring once the payload resolves.
pub fn load_dataset_system(
    mut loader: ResMut<DatasetLoader>,
    mut progress: ResMut<LoadingProgress>,
    mut cloud: ResMut<CloudAssets>,
    asset_server: Res<AssetServer>,
    datasets: Res<Assets<PointCloudDataset>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
    time: Res<Time>,
) {
    if progress.installed || progress.failed {
        return;
    }

    // Settle briefly before starting so the overlay does not flash.
    progress.lead_in.tick(time.delta());
    if !progress.lead_in.finished() {
        return;
    }

    let Some(handle) = loader.handle.clone() else {
        println!("Loading dataset from: {DATASET_PATH}");
        loader.handle = Some(asset_server.load(DATASET_PATH));
        progress.fraction = 0.0;
        return;
    };

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => {}
        Some(LoadState::Failed(err)) => {
            // Only externally-reported failure: log it and stay in the
            // empty-cloud state (no partial colour buffer).
            warn!("dataset load failed: {err}");
            progress.failed = true;
            return;
        }
        _ => {
            // Request is in flight; the transport reports no finer grain.
            progress.fraction = progress.fraction.max(0.25);
            return;
        }
    }

    let Some(dataset) = datasets.get(&handle) else {
        return;
    };

    let store = PointCloudStore::from_raw_points(dataset.points.iter().copied());
    progress.fraction = 0.75;

    let mesh_handle = meshes.add(create_point_mesh(&store));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    let entity = commands
        .spawn((
            Mesh3d(mesh_handle.clone()),
            MeshMaterial3d(material),
            Transform::IDENTITY,
            PointCloud,
            NoFrustumCulling,
            Name::new("PointCloud"),
        ))
        .id();

    println!("Point cloud installed: {} points", store.len());

    cloud.store = Some(store);
    cloud.mesh = mesh_handle;
    cloud.cloud_entity = Some(entity);
    cloud.is_loaded = true;
    progress.fraction = 1.0;
    progress.installed = true;
}

#[derive(Component)]
pub struct LoadingOverlayText;

/// Centered status text shown while the dataset resolves
pub fn spawn_loading_overlay(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            LoadingOverlayRoot,
            Name::new("LoadingOverlay"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Data is loading... 0%"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                LoadingOverlayText,
            ));
        });
}

#[derive(Component)]
pub struct LoadingOverlayRoot;

pub fn update_loading_overlay(
    progress: Res<LoadingProgress>,
    mut query: Query<&mut Text, With<LoadingOverlayText>>,
) {
    for mut text in &mut query {
        text.0 = if progress.failed {
            "Dataset load failed".to_string()
        } else {
            format!("Data is loading... {:.0}%", progress.fraction * 100.0)
        };
    }
}

pub fn despawn_loading_overlay(
    mut commands: Commands,
    query: Query<Entity, With<LoadingOverlayRoot>>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
