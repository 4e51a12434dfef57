//! Interactive tools for point cloud annotation.
//!
//! One tool lives here: the cuboid annotation tool. Its pure core (registry,
//! selection state machine, containment classifier) carries the editor's
//! invariants and is unit-tested in place; the Bevy systems around it are
//! thin adapters translating input into registry/selection calls.

pub mod cuboid;
