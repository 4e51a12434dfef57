use bevy::prelude::*;

use super::registry::CuboidId;

/// Editable transform fields, one per property-panel commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformField {
    PosX,
    PosY,
    PosZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    RotX,
    RotY,
    RotZ,
}

/// Display toggles; flipping them never triggers a classifier pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleField {
    Visible,
    Wireframe,
}

/// Commands surfaced to the UI layer. Ids referencing removed cuboids
/// degrade to silent no-ops, since a listing can be stale by one event.
#[derive(Event, Debug, Clone, Copy)]
pub enum CuboidCommand {
    Create,
    Remove(CuboidId),
    Select(CuboidId),
    SetField {
        id: CuboidId,
        field: TransformField,
        value: f32,
    },
    Toggle {
        id: CuboidId,
        field: ToggleField,
    },
}

/// Drag lifecycle from the mouse pick. Start disables orbit navigation and
/// selects the grabbed cuboid; every Move tick commits a new center and
/// requests a classifier pass; End re-enables navigation.
#[derive(Event, Debug, Clone, Copy)]
pub enum DragEvent {
    Start(CuboidId),
    Move { id: CuboidId, center: Vec3 },
    End,
}

/// Transient pointer highlight; never selection, never a classifier pass.
#[derive(Event, Debug, Clone, Copy)]
pub enum HoverEvent {
    On(CuboidId),
    Off(CuboidId),
}

/// Request one containment pass against the named cuboid. Multiple requests
/// in a frame collapse to the last one.
#[derive(Event, Debug, Clone, Copy)]
pub struct RecolourRequest {
    pub id: CuboidId,
}

/// Explicit, idempotent editor teardown: despawns the cloud, cuboids and
/// panel, and resets the annotation resources (registry counter included).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DisposeEditor;
