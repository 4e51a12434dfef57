pub mod point_mesh;
