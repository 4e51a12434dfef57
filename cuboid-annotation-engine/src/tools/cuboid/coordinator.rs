use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::math::primitives::Cuboid as CuboidPrimitive;
use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use constants::render_settings::CUBOID_HOVER_TINT;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::cloud::loader::CloudAssets;

use super::containment::classify;
use super::events::{
    CuboidCommand, DisposeEditor, DragEvent, HoverEvent, RecolourRequest, ToggleField,
    TransformField,
};
use super::ray::{ray_hits_cuboid, ray_hits_ground_plane};
use super::registry::{Cuboid, CuboidId, CuboidRegistry};
use super::selection::{self, SelectionState};
use super::ui::CuboidPanelRoot;

/// In-flight drag: grabbed cuboid, the horizontal plane it slides on, and
/// the grab offset so the box does not jump to the cursor.
#[derive(Resource, Default)]
pub struct DragState {
    active: Option<DragGrab>,
}

struct DragGrab {
    id: CuboidId,
    plane_height: f32,
    offset: Vec3,
}

impl DragState {
    pub fn dragging(&self) -> Option<CuboidId> {
        self.active.as_ref().map(|grab| grab.id)
    }
}

/// Transient pointer highlight target; never affects selection.
#[derive(Resource, Default)]
pub struct HoverState {
    pub hovered: Option<CuboidId>,
}

#[derive(Component)]
pub struct CuboidMarker(pub CuboidId);

/// Shared unit-cube mesh for every cuboid entity.
#[derive(Resource, Default)]
pub struct CuboidMesh(Handle<Mesh>);

fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&GlobalTransform, &Camera), With<Camera3d>>,
) -> Option<(Vec3, Vec3)> {
    let window = windows.single().ok()?;
    let cursor_pos = window.cursor_position()?;
    let (cam_xf, camera) = cameras.single().ok()?;
    let ray = camera.viewport_to_world(cam_xf, cursor_pos).ok()?;
    Some((ray.origin, ray.direction.as_vec3()))
}

fn pick_cuboid(registry: &CuboidRegistry, origin: Vec3, dir: Vec3) -> Option<(CuboidId, f32)> {
    let mut best: Option<(CuboidId, f32)> = None;
    for cuboid in registry.list() {
        if !cuboid.visible {
            continue;
        }
        if let Some(t) = ray_hits_cuboid(origin, dir, &cuboid.transform) {
            if t > 0.0 && best.is_none_or(|(_, bt)| t < bt) {
                best = Some((cuboid.id, t));
            }
        }
    }
    best
}

/// Translate raw mouse input into the drag lifecycle events
pub fn pick_and_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    registry: Res<CuboidRegistry>,
    mut drag: ResMut<DragState>,
    mut events: EventWriter<DragEvent>,
) {
    if buttons.just_pressed(MouseButton::Left) {
        let Some((origin, dir)) = cursor_ray(&windows, &cameras) else {
            return;
        };
        if let Some((id, t)) = pick_cuboid(&registry, origin, dir) {
            let Some(cuboid) = registry.get(id) else {
                return;
            };
            let hit = origin + dir * t;
            drag.active = Some(DragGrab {
                id,
                plane_height: hit.y,
                offset: hit - cuboid.transform.center,
            });
            events.write(DragEvent::Start(id));
        }
        return;
    }

    if buttons.pressed(MouseButton::Left) {
        let Some(grab) = drag.active.as_ref() else {
            return;
        };
        let Some((origin, dir)) = cursor_ray(&windows, &cameras) else {
            return;
        };
        let Some(hit) = ray_hits_ground_plane(origin, dir, grab.plane_height) else {
            return;
        };
        let new_center = hit - grab.offset;
        let moved = registry
            .get(grab.id)
            .is_some_and(|c| c.transform.center.distance(new_center) > 1e-4);
        if moved {
            events.write(DragEvent::Move {
                id: grab.id,
                center: new_center,
            });
        }
        return;
    }

    if drag.active.is_some() && buttons.just_released(MouseButton::Left) {
        drag.active = None;
        events.write(DragEvent::End);
    }
}

/// Emit hover transitions when the pointer crosses cuboid silhouettes
pub fn hover_pick(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    registry: Res<CuboidRegistry>,
    drag: Res<DragState>,
    hover: Res<HoverState>,
    mut events: EventWriter<HoverEvent>,
) {
    if drag.active.is_some() || buttons.pressed(MouseButton::Left) {
        return;
    }

    let over = cursor_ray(&windows, &cameras)
        .and_then(|(origin, dir)| pick_cuboid(&registry, origin, dir))
        .map(|(id, _)| id);

    if over == hover.hovered {
        return;
    }
    if let Some(prev) = hover.hovered {
        events.write(HoverEvent::Off(prev));
    }
    if let Some(id) = over {
        events.write(HoverEvent::On(id));
    }
}

/// While a drag is in progress the scroll wheel rotates the grabbed cuboid
/// about Y, with zoom locked for the frame so the dolly does not fight the
/// edit. Outside a drag the wheel belongs to the camera.
pub fn rotate_selected_with_wheel(
    mut wheel: EventReader<MouseWheel>,
    registry: Res<CuboidRegistry>,
    drag: Res<DragState>,
    mut orbit: ResMut<OrbitCamera>,
    mut commands: EventWriter<CuboidCommand>,
) {
    let Some(id) = drag.dragging() else {
        return;
    };
    if wheel.is_empty() {
        return;
    }

    let mut delta = 0.0f32;
    for ev in wheel.read() {
        delta += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    orbit.lock_zoom_this_frame = true;

    if delta.abs() < f32::EPSILON {
        return;
    }
    let Some(cuboid) = registry.get(id) else {
        return;
    };
    commands.write(CuboidCommand::SetField {
        id,
        field: TransformField::RotY,
        value: cuboid.transform.rotation.y + delta * 0.1,
    });
}

/// Keyboard shortcuts: Delete removes the selection, +/- commit uniform
/// scale edits through the property path.
pub fn keyboard_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<CuboidRegistry>,
    selection: Res<SelectionState>,
    mut commands: EventWriter<CuboidCommand>,
) {
    let Some(id) = selection.active() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Delete) {
        commands.write(CuboidCommand::Remove(id));
        return;
    }

    let step = if keyboard.just_pressed(KeyCode::Equal) {
        0.1
    } else if keyboard.just_pressed(KeyCode::Minus) {
        -0.1
    } else {
        return;
    };

    let Some(cuboid) = registry.get(id) else {
        return;
    };
    let scale = cuboid.transform.scale;
    for (field, current) in [
        (TransformField::ScaleX, scale.x),
        (TransformField::ScaleY, scale.y),
        (TransformField::ScaleZ, scale.z),
    ] {
        commands.write(CuboidCommand::SetField {
            id,
            field,
            value: (current + step).max(0.0),
        });
    }
}

/// Apply the drag lifecycle: Start locks the orbit camera and selects the
/// grabbed cuboid, Move commits the new center and requests a containment
/// pass, End releases the camera.
pub fn handle_drag_events(
    mut events: EventReader<DragEvent>,
    mut registry: ResMut<CuboidRegistry>,
    mut selection: ResMut<SelectionState>,
    mut hover: ResMut<HoverState>,
    mut orbit: ResMut<OrbitCamera>,
    mut recolour: EventWriter<RecolourRequest>,
) {
    for event in events.read() {
        match *event {
            DragEvent::Start(id) => {
                orbit.enabled = false;
                selection::select(&mut registry, &mut selection, id);
                // The grabbed cuboid is now active; hover no longer applies.
                if hover.hovered == Some(id) {
                    hover.hovered = None;
                }
            }
            DragEvent::Move { id, center } => {
                if let Some(cuboid) = registry.get_mut(id) {
                    cuboid.transform.center = center;
                    recolour.write(RecolourRequest { id });
                }
            }
            DragEvent::End => {
                orbit.enabled = true;
            }
        }
    }
}

/// Dispatch UI-layer commands onto the registry and selection machine
pub fn handle_cuboid_commands(
    mut events: EventReader<CuboidCommand>,
    mut registry: ResMut<CuboidRegistry>,
    mut selection: ResMut<SelectionState>,
    mut orbit: ResMut<OrbitCamera>,
    mut recolour: EventWriter<RecolourRequest>,
) {
    for event in events.read() {
        match *event {
            CuboidCommand::Create => {
                let created = registry.create();
                let id = created.id;
                info!("created {}", created.label());
                // The first cuboid in the scene is auto-selected.
                if registry.len() == 1 {
                    selection::select(&mut registry, &mut selection, id);
                }
            }
            CuboidCommand::Remove(id) => {
                if let Some(removed) = registry.remove(id) {
                    info!("removed {}", removed.label());
                    selection::handle_removal(&mut registry, &mut selection, id);
                }
            }
            CuboidCommand::Select(id) => {
                if selection::select(&mut registry, &mut selection, id) {
                    if let Some(cuboid) = registry.get(id) {
                        // Refocus the camera on the newly selected cuboid.
                        orbit.focus_on(cuboid.transform.center);
                    }
                }
            }
            CuboidCommand::SetField { id, field, value } => {
                if let Some(cuboid) = registry.get_mut(id) {
                    apply_field(cuboid, field, value);
                    recolour.write(RecolourRequest { id });
                }
            }
            CuboidCommand::Toggle { id, field } => {
                if let Some(cuboid) = registry.get_mut(id) {
                    match field {
                        ToggleField::Visible => cuboid.visible = !cuboid.visible,
                        ToggleField::Wireframe => cuboid.wireframe = !cuboid.wireframe,
                    }
                }
            }
        }
    }
}

fn apply_field(cuboid: &mut Cuboid, field: TransformField, value: f32) {
    let t = &mut cuboid.transform;
    match field {
        TransformField::PosX => t.center.x = value,
        TransformField::PosY => t.center.y = value,
        TransformField::PosZ => t.center.z = value,
        TransformField::ScaleX => t.scale.x = value.max(0.0),
        TransformField::ScaleY => t.scale.y = value.max(0.0),
        TransformField::ScaleZ => t.scale.z = value.max(0.0),
        TransformField::RotX => t.rotation.x = value,
        TransformField::RotY => t.rotation.y = value,
        TransformField::RotZ => t.rotation.z = value,
    }
}

/// Apply hover transitions; the active cuboid never takes the hover tint.
pub fn handle_hover_events(
    mut events: EventReader<HoverEvent>,
    selection: Res<SelectionState>,
    mut hover: ResMut<HoverState>,
) {
    for event in events.read() {
        match *event {
            HoverEvent::On(id) => {
                if !selection.is_selected(id) {
                    hover.hovered = Some(id);
                }
            }
            HoverEvent::Off(id) => {
                if hover.hovered == Some(id) {
                    hover.hovered = None;
                }
            }
        }
    }
}

/// One containment pass per frame at most: collapse queued requests to the
/// last and recolour the cloud against that cuboid's current volume.
pub fn run_containment_pass(
    mut requests: EventReader<RecolourRequest>,
    registry: Res<CuboidRegistry>,
    mut cloud: ResMut<CloudAssets>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };
    // Stale id: the cuboid was removed in the same frame, nothing to do.
    let Some(cuboid) = registry.get(request.id) else {
        return;
    };
    let Some(store) = cloud.store.as_mut() else {
        return;
    };

    if let Err(err) = classify(store, cuboid) {
        warn!("containment pass failed: {err}");
        return;
    }
    cloud.colours_dirty = true;
}

/// Mirror the registry into scene entities: spawn newcomers, despawn the
/// removed, and push transform/style/toggle state into the render side.
/// Hover tint applies only to a hovered cuboid that is not the active one;
/// the selected style always wins, even when stale hover state lingers.
fn wireframe_tint(cuboid: &Cuboid, hover: &HoverState, selection: &SelectionState) -> Color {
    if hover.hovered == Some(cuboid.id) && !selection.is_selected(cuboid.id) {
        CUBOID_HOVER_TINT
    } else {
        cuboid.style.tint
    }
}

pub fn sync_cuboid_entities(
    mut commands: Commands,
    registry: Res<CuboidRegistry>,
    selection: Res<SelectionState>,
    hover: Res<HoverState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut shared_mesh: ResMut<CuboidMesh>,
    mut existing: Query<(
        Entity,
        &CuboidMarker,
        &mut Transform,
        &mut Visibility,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let mut seen: Vec<CuboidId> = Vec::with_capacity(registry.len());

    for (entity, marker, mut transform, mut visibility, material) in &mut existing {
        let Some(cuboid) = registry.get(marker.0) else {
            commands.entity(entity).despawn();
            continue;
        };
        seen.push(cuboid.id);

        transform.translation = cuboid.transform.center;
        transform.rotation = cuboid.transform.rotation_quat();
        transform.scale = cuboid.transform.scale;
        *visibility = if cuboid.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };

        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = cuboid.style.tint.with_alpha(cuboid.style.opacity);
        }

        if cuboid.wireframe {
            commands.entity(entity).insert(Wireframe);
        } else {
            commands.entity(entity).remove::<Wireframe>();
        }
        commands.entity(entity).insert(WireframeColor {
            color: wireframe_tint(cuboid, &hover, &selection),
        });
    }

    for cuboid in registry.list() {
        if seen.contains(&cuboid.id) {
            continue;
        }
        if shared_mesh.0 == Handle::default() {
            shared_mesh.0 = meshes.add(Mesh::from(CuboidPrimitive::new(1.0, 1.0, 1.0)));
        }
        let material = materials.add(StandardMaterial {
            base_color: cuboid.style.tint.with_alpha(cuboid.style.opacity),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(shared_mesh.0.clone()),
            MeshMaterial3d(material),
            Transform {
                translation: cuboid.transform.center,
                rotation: cuboid.transform.rotation_quat(),
                scale: cuboid.transform.scale,
            },
            Wireframe,
            WireframeColor {
                color: cuboid.style.tint,
            },
            CuboidMarker(cuboid.id),
            Name::new(cuboid.label()),
        ));
    }
}

/// Explicit teardown: despawn everything the editor spawned and reset the
/// annotation resources. Safe to fire twice.
pub fn handle_dispose(
    mut events: EventReader<DisposeEditor>,
    mut commands: Commands,
    mut registry: ResMut<CuboidRegistry>,
    mut selection: ResMut<SelectionState>,
    mut hover: ResMut<HoverState>,
    mut drag: ResMut<DragState>,
    mut cloud: ResMut<CloudAssets>,
    cuboid_entities: Query<Entity, With<CuboidMarker>>,
    panel: Query<Entity, With<CuboidPanelRoot>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    for entity in &cuboid_entities {
        commands.entity(entity).despawn();
    }
    for entity in &panel {
        commands.entity(entity).despawn();
    }
    if let Some(entity) = cloud.cloud_entity.take() {
        commands.entity(entity).despawn();
    }

    *registry = CuboidRegistry::default();
    *selection = SelectionState::default();
    hover.hovered = None;
    drag.active = None;
    cloud.store = None;
    cloud.is_loaded = false;
    cloud.colours_dirty = false;
    info!("editor disposed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_cuboid_never_takes_the_hover_tint() {
        let mut registry = CuboidRegistry::default();
        let mut state = SelectionState::default();
        let a = registry.create().id;
        let b = registry.create().id;
        selection::select(&mut registry, &mut state, a);

        // Stale hover pointing at the active cuboid keeps the selected style.
        let hover = HoverState { hovered: Some(a) };
        let active = registry.get(a).unwrap();
        assert_eq!(wireframe_tint(active, &hover, &state), active.style.tint);

        // Hovering an unselected cuboid still highlights it.
        let hover = HoverState { hovered: Some(b) };
        let other = registry.get(b).unwrap();
        assert_eq!(wireframe_tint(other, &hover, &state), CUBOID_HOVER_TINT);

        // No hover at all: plain style either way.
        let hover = HoverState::default();
        assert_eq!(wireframe_tint(other, &hover, &state), other.style.tint);
    }

    #[test]
    fn selection_alone_leaves_the_wheel_to_the_camera() {
        // A live selection without a drag must not capture the wheel.
        assert_eq!(DragState::default().dragging(), None);

        let drag = DragState {
            active: Some(DragGrab {
                id: 4,
                plane_height: 0.0,
                offset: Vec3::ZERO,
            }),
        };
        assert_eq!(drag.dragging(), Some(4));
    }
}
