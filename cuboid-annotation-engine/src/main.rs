use bevy::asset::AssetMetaCheck;
use bevy::pbr::wireframe::WireframePlugin;
use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy_common_assets::json::JsonAssetPlugin;

mod engine;
mod tools;

use engine::camera::orbit_camera::{
    OrbitCamera, camera_controller, sync_camera_transform, toggle_projection_mode,
};
use engine::cloud::dataset::PointCloudDataset;
use engine::cloud::loader::{
    CloudAssets, DatasetLoader, despawn_loading_overlay, load_dataset_system,
    spawn_loading_overlay, update_loading_overlay,
};
use engine::core::app_state::{AppState, LoadingProgress, transition_to_running};
use engine::mesh::point_mesh::sync_point_colours;
use engine::scene::axes::draw_world_axes;
use tools::cuboid::{CuboidAnnotationPlugin, CuboidToolSet};

fn main() {
    let mut app = create_app();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}

/// Create application with point cloud loading and the cuboid annotation tool
fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(WireframePlugin::default())
        .add_plugins(JsonAssetPlugin::<PointCloudDataset>::new(&["cloud.json"]))
        .add_plugins(CuboidAnnotationPlugin);

    app.init_state::<AppState>()
        .init_resource::<DatasetLoader>()
        .init_resource::<LoadingProgress>()
        .init_resource::<CloudAssets>()
        .init_resource::<OrbitCamera>()
        .add_systems(Startup, setup)
        .add_systems(OnEnter(AppState::Loading), spawn_loading_overlay)
        .add_systems(OnExit(AppState::Loading), despawn_loading_overlay)
        .add_systems(
            Update,
            (
                load_dataset_system,
                update_loading_overlay,
                transition_to_running,
            )
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            sync_point_colours.run_if(in_state(AppState::Running)),
        )
        .add_systems(
            Update,
            (
                camera_controller,
                toggle_projection_mode,
                sync_camera_transform,
            )
                .chain()
                .after(CuboidToolSet),
        )
        .add_systems(Update, draw_world_axes);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some("#main".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Spawn the editor camera and scene lighting
fn setup(mut commands: Commands, orbit: Res<OrbitCamera>) {
    println!("=== CUBOID ANNOTATION ENGINE ===");

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.10,
            far: 300.0,
            ..default()
        }),
        Transform::from_translation(constants::render_settings::CAMERA_INITIAL_POSITION)
            .looking_at(orbit.focus_point, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}
