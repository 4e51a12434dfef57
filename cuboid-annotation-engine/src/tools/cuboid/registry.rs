use bevy::prelude::*;

use constants::render_settings::{CUBOID_BASE_OPACITY, CUBOID_BASE_TINT};

/// Session-unique cuboid identifier. Never reused, so a stale external
/// reference can never alias a newer cuboid.
pub type CuboidId = u32;

/// Center / per-axis scale / XYZ Euler rotation of one annotation box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuboidTransform {
    pub center: Vec3,
    pub scale: Vec3,
    pub rotation: Vec3,
}

impl Default for CuboidTransform {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }
}

impl CuboidTransform {
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

/// Closed visual-material variant: tint and opacity, nothing open-ended.
/// The wireframe flag lives on the cuboid itself next to `visible`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuboidStyle {
    pub tint: Color,
    pub opacity: f32,
}

impl Default for CuboidStyle {
    fn default() -> Self {
        Self {
            tint: CUBOID_BASE_TINT,
            opacity: CUBOID_BASE_OPACITY,
        }
    }
}

/// One annotation box. Display toggles have no effect on containment.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    pub id: CuboidId,
    pub transform: CuboidTransform,
    pub visible: bool,
    pub wireframe: bool,
    pub style: CuboidStyle,
}

impl Cuboid {
    fn new(id: CuboidId) -> Self {
        Self {
            id,
            transform: CuboidTransform::default(),
            visible: true,
            wireframe: true,
            style: CuboidStyle::default(),
        }
    }

    pub fn label(&self) -> String {
        format!("Cuboid-{}", self.id)
    }
}

/// Owns the live cuboids. Ids come from a monotonically increasing counter
/// that is a field of the registry: it resets only when a registry is
/// constructed, never behind the back of a second editor instance.
#[derive(Resource, Default)]
pub struct CuboidRegistry {
    cuboids: Vec<Cuboid>,
    next_id: CuboidId,
}

impl CuboidRegistry {
    /// Allocate the next id and append a unit cuboid at the world origin.
    pub fn create(&mut self) -> &Cuboid {
        let id = self.next_id;
        self.next_id += 1;
        self.cuboids.push(Cuboid::new(id));
        // Just pushed, last element exists.
        self.cuboids.last().unwrap()
    }

    /// Remove a cuboid. Unknown ids are a silent no-op (`None`): the UI can
    /// be stale by one event in the cooperative model.
    pub fn remove(&mut self, id: CuboidId) -> Option<Cuboid> {
        let index = self.cuboids.iter().position(|c| c.id == id)?;
        Some(self.cuboids.remove(index))
    }

    /// Live cuboids in stable creation order.
    pub fn list(&self) -> &[Cuboid] {
        &self.cuboids
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cuboid> {
        self.cuboids.iter_mut()
    }

    pub fn get(&self, id: CuboidId) -> Option<&Cuboid> {
        self.cuboids.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CuboidId) -> Option<&mut Cuboid> {
        self.cuboids.iter_mut().find(|c| c.id == id)
    }

    /// Earliest-created live cuboid, the deterministic selection successor.
    pub fn first_id(&self) -> Option<CuboidId> {
        self.cuboids.first().map(|c| c.id)
    }

    pub fn len(&self) -> usize {
        self.cuboids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuboids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_strictly_increase_and_never_recycle() {
        let mut registry = CuboidRegistry::default();

        let a = registry.create().id;
        let b = registry.create().id;
        assert!(b > a);

        registry.remove(b);
        let c = registry.create().id;
        assert!(c > b, "removed id {b} must not be reissued as {c}");
    }

    #[test]
    fn list_is_exactly_the_live_set_in_creation_order() {
        let mut registry = CuboidRegistry::default();
        let a = registry.create().id;
        let b = registry.create().id;
        let c = registry.create().id;

        registry.remove(b);

        let ids: Vec<CuboidId> = registry.list().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a, c]);

        let mut unique = ids.clone();
        unique.dedup();
        assert_eq!(unique, ids);
    }

    #[test]
    fn remove_unknown_id_is_a_silent_noop() {
        let mut registry = CuboidRegistry::default();
        registry.create();

        assert!(registry.remove(99).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn created_cuboid_is_a_unit_box_at_origin() {
        let mut registry = CuboidRegistry::default();
        let cuboid = registry.create();

        assert_eq!(cuboid.transform.center, Vec3::ZERO);
        assert_eq!(cuboid.transform.scale, Vec3::ONE);
        assert_eq!(cuboid.transform.rotation, Vec3::ZERO);
        assert!(cuboid.visible);
        assert!(cuboid.wireframe);
        assert_eq!(cuboid.label(), "Cuboid-0");
    }

    #[test]
    fn counter_resets_with_the_registry_not_across_it() {
        let mut first = CuboidRegistry::default();
        first.create();
        first.create();

        // A second editor instance gets its own counter.
        let mut second = CuboidRegistry::default();
        assert_eq!(second.create().id, 0);
    }
}
