use bevy::prelude::*;

use constants::render_settings::{
    CUBOID_BASE_OPACITY, CUBOID_BASE_TINT, CUBOID_SELECTED_OPACITY, CUBOID_SELECTED_TINT,
};

use super::registry::{Cuboid, CuboidId, CuboidRegistry};

/// Which single cuboid, if any, is active. Written only by the functions in
/// this module; everything else reads.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    active: Option<CuboidId>,
}

impl SelectionState {
    pub fn active(&self) -> Option<CuboidId> {
        self.active
    }

    pub fn is_selected(&self, id: CuboidId) -> bool {
        self.active == Some(id)
    }
}

/// Select a live cuboid and restyle every cuboid's material: the selected
/// one gets the highlight tint and raised opacity, all others revert.
/// O(live cuboids), run on every selection change. Unknown ids are a
/// silent no-op and leave the current selection untouched.
pub fn select(registry: &mut CuboidRegistry, selection: &mut SelectionState, id: CuboidId) -> bool {
    if registry.get(id).is_none() {
        return false;
    }

    selection.active = Some(id);
    restyle(registry, selection);
    true
}

/// Successor rule: when the removed cuboid was selected, selection moves to
/// the earliest-created remaining cuboid; with none left it clears. Removal
/// of a non-selected cuboid changes nothing.
pub fn handle_removal(
    registry: &mut CuboidRegistry,
    selection: &mut SelectionState,
    removed: CuboidId,
) {
    if selection.active != Some(removed) {
        return;
    }

    match registry.first_id() {
        Some(successor) => {
            selection.active = Some(successor);
        }
        None => {
            selection.active = None;
        }
    }
    restyle(registry, selection);
}

/// The currently selected cuboid, or none.
pub fn selected<'a>(
    registry: &'a CuboidRegistry,
    selection: &SelectionState,
) -> Option<&'a Cuboid> {
    registry.get(selection.active?)
}

fn restyle(registry: &mut CuboidRegistry, selection: &SelectionState) {
    for cuboid in registry.iter_mut() {
        if selection.is_selected(cuboid.id) {
            cuboid.style.tint = CUBOID_SELECTED_TINT;
            cuboid.style.opacity = CUBOID_SELECTED_OPACITY;
        } else {
            cuboid.style.tint = CUBOID_BASE_TINT;
            cuboid.style.opacity = CUBOID_BASE_OPACITY;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_requires_a_live_id() {
        let mut registry = CuboidRegistry::default();
        let mut selection = SelectionState::default();
        let a = registry.create().id;

        assert!(!select(&mut registry, &mut selection, a + 7));
        assert_eq!(selection.active(), None);

        assert!(select(&mut registry, &mut selection, a));
        assert_eq!(selection.active(), Some(a));
    }

    #[test]
    fn at_most_one_cuboid_is_highlighted() {
        let mut registry = CuboidRegistry::default();
        let mut selection = SelectionState::default();
        let a = registry.create().id;
        let b = registry.create().id;
        let c = registry.create().id;

        select(&mut registry, &mut selection, b);

        let highlighted: Vec<CuboidId> = registry
            .list()
            .iter()
            .filter(|c| c.style.tint == CUBOID_SELECTED_TINT)
            .map(|c| c.id)
            .collect();
        assert_eq!(highlighted, vec![b]);
        assert_eq!(registry.get(a).unwrap().style.opacity, CUBOID_BASE_OPACITY);
        assert_eq!(
            registry.get(b).unwrap().style.opacity,
            CUBOID_SELECTED_OPACITY
        );
        assert_eq!(registry.get(c).unwrap().style.tint, CUBOID_BASE_TINT);
    }

    #[test]
    fn creation_never_steals_selection() {
        let mut registry = CuboidRegistry::default();
        let mut selection = SelectionState::default();

        // Only the first cuboid is auto-selected (by its creating caller).
        let a = registry.create().id;
        select(&mut registry, &mut selection, a);
        let _b = registry.create().id;

        assert_eq!(selection.active(), Some(a));
    }

    #[test]
    fn successor_is_the_earliest_created_remaining() {
        let mut registry = CuboidRegistry::default();
        let mut selection = SelectionState::default();
        let a = registry.create().id;
        let b = registry.create().id;
        let c = registry.create().id;

        select(&mut registry, &mut selection, b);
        registry.remove(b);
        handle_removal(&mut registry, &mut selection, b);

        // Not "most recently created" (c), but first in creation order.
        assert_eq!(selection.active(), Some(a));
        assert_ne!(selection.active(), Some(c));
    }

    #[test]
    fn removing_the_last_cuboid_clears_selection() {
        let mut registry = CuboidRegistry::default();
        let mut selection = SelectionState::default();
        let a = registry.create().id;
        select(&mut registry, &mut selection, a);

        registry.remove(a);
        handle_removal(&mut registry, &mut selection, a);

        assert_eq!(selection.active(), None);
        assert!(selected(&registry, &selection).is_none());
    }

    #[test]
    fn removing_an_unselected_cuboid_keeps_selection() {
        let mut registry = CuboidRegistry::default();
        let mut selection = SelectionState::default();
        let a = registry.create().id;
        let b = registry.create().id;

        select(&mut registry, &mut selection, b);
        registry.remove(a);
        handle_removal(&mut registry, &mut selection, a);

        assert_eq!(selection.active(), Some(b));
    }
}
