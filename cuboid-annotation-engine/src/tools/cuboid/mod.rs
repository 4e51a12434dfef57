//! Cuboid annotation tool: place, edit and remove labelling volumes over a
//! loaded point cloud, with live point containment feedback.
//!
//! ## Architecture
//!
//! All mutation funnels through events; no system writes the registry
//! directly from input or UI code:
//!
//! ```text
//! mouse / keyboard / panel widgets
//!   └─> CuboidCommand | DragEvent | HoverEvent
//!         └─> coordinator systems mutate CuboidRegistry + SelectionState
//!               └─> RecolourRequest  -> one containment pass per frame
//!               └─> PanelModel       -> panel body rebuild on change
//!               └─> sync_cuboid_entities -> scene mirror
//! ```
//!
//! Geometry edits (drag moves, property commits) request a containment
//! pass; display toggles and hover never do. The panel is a stateless
//! projection of the registry and selection, rebuilt wholesale whenever
//! the projected model differs from the cached one.

/// Point membership classification against a cuboid's enclosing volume.
///
/// Full pass over the cloud store, two colours, boundary ties contained.
pub mod containment;

/// Input translation and event dispatch: picking, dragging, hovering,
/// command handling, containment scheduling, scene entity sync, teardown.
pub mod coordinator;

/// Event vocabulary for the tool: commands, drag lifecycle, hover,
/// recolour requests and editor teardown.
pub mod events;

/// Ray intersection utilities for oriented cuboid picking and ground-plane
/// dragging. Slab method against transformed AABBs in box-local space.
pub mod ray;

/// Cuboid records and the id-owning registry.
pub mod registry;

/// Single-selection state machine with highlight restyling and the
/// removal successor rule.
pub mod selection;

/// Side panel: view-model projection, widget spawning and button
/// interactions.
pub mod ui;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;

pub use registry::{Cuboid, CuboidId, CuboidRegistry};
pub use selection::SelectionState;

use coordinator::{
    CuboidMesh, DragState, HoverState, handle_cuboid_commands, handle_dispose,
    handle_drag_events, handle_hover_events, hover_pick, keyboard_commands, pick_and_drag,
    rotate_selected_with_wheel, run_containment_pass, sync_cuboid_entities,
};
use events::{CuboidCommand, DisposeEditor, DragEvent, HoverEvent, RecolourRequest};
use ui::{
    PanelModel, create_button_interaction, field_nudge_interaction, refresh_panel,
    remove_button_interaction, row_select_interaction, spawn_panel, toggle_button_interaction,
};

/// Label for the tool's Update systems so the camera controller can be
/// ordered after them (drag must win the frame's orbit-enable decision).
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CuboidToolSet;

// Registers the cuboid panel, resources, events, and systems.
pub struct CuboidAnnotationPlugin;

impl Plugin for CuboidAnnotationPlugin {
    fn build(&self, app: &mut App) {
        app
            // init resources
            .init_resource::<CuboidRegistry>()
            .init_resource::<SelectionState>()
            .init_resource::<HoverState>()
            .init_resource::<DragState>()
            .init_resource::<CuboidMesh>()
            .init_resource::<PanelModel>()
            .add_event::<CuboidCommand>()
            .add_event::<DragEvent>()
            .add_event::<HoverEvent>()
            .add_event::<RecolourRequest>()
            .add_event::<DisposeEditor>()
            .add_systems(OnEnter(AppState::Running), spawn_panel)
            .add_systems(
                Update,
                (
                    // Input translation
                    pick_and_drag,
                    hover_pick,
                    rotate_selected_with_wheel,
                    keyboard_commands,
                    // Panel widgets
                    create_button_interaction,
                    row_select_interaction,
                    remove_button_interaction,
                    toggle_button_interaction,
                    field_nudge_interaction,
                    // Dispatch
                    handle_drag_events,
                    handle_hover_events,
                    handle_cuboid_commands,
                    run_containment_pass,
                    // Projections
                    sync_cuboid_entities,
                    refresh_panel,
                    handle_dispose,
                )
                    .chain()
                    .in_set(CuboidToolSet)
                    .run_if(in_state(AppState::Running)),
            );
    }
}
