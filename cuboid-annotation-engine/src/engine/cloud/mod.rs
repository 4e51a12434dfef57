//! Point cloud ownership and loading.
//!
//! `store` holds the one loaded dataset: immutable positions (already
//! realigned to the editor's Y-up world at ingest) and the mutable per-point
//! colour buffer the containment classifier writes into. `dataset` is the
//! JSON asset the transport yields, `loader` drives the asset server request
//! and installs the store once the payload resolves.

pub mod dataset;
pub mod loader;
pub mod store;
