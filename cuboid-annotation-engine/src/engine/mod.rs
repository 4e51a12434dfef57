pub mod camera;
pub mod cloud;
pub mod core;
pub mod mesh;
pub mod scene;
