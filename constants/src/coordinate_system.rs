/// Coordinate transformation matrix (row-major: [x_new, y_new, z_new])
/// Maps dataset axes onto the editor's Y-up world: (x, y, z) → (−x, z, y)
pub const COORDINATE_TRANSFORM: [[f32; 3]; 3] = [
    [-1.0, 0.0, 0.0], // X = -X
    [0.0, 0.0, 1.0],  // Y = Z
    [0.0, 1.0, 0.0],  // Z = Y
];

/// Apply coordinate transformation matrix to ensure consistency.
/// Transforms input coordinates using predefined transformation matrix.
pub fn transform_coordinates(x: f32, y: f32, z: f32) -> (f32, f32, f32) {
    let input = [x, y, z];
    let mut output = [0.0; 3];

    for i in 0..3 {
        for j in 0..3 {
            output[i] += COORDINATE_TRANSFORM[i][j] * input[j];
        }
    }

    (output[0], output[1], output[2])
}

/// Convenience wrapper for positions stored as flat triples.
pub fn dataset_to_world(position: [f32; 3]) -> [f32; 3] {
    let (x, y, z) = transform_coordinates(position[0], position[1], position[2]);
    [x, y, z]
}
