/// Whole-triangle near-plane culling
use nalgebra::Vector3;

use crate::geometry::Face;

/// Camera-space z above this is behind, or too close to, the camera.
pub const NEAR_PLANE_EPSILON: f64 = -0.01;

/// A triangle is drawn only when every corner is in front of the near plane.
///
/// Triangles crossing the plane are dropped whole, never split.
pub fn is_visible(face: &Face, camera_space: &[Vector3<f64>]) -> bool {
    face.corners()
        .iter()
        .all(|&i| camera_space[i].z <= NEAR_PLANE_EPSILON)
}

/// Faces that pass [`is_visible`], in mesh order.
pub fn visible_faces<'a>(
    faces: &'a [Face],
    camera_space: &'a [Vector3<f64>],
) -> impl Iterator<Item = &'a Face> + 'a {
    faces
        .iter()
        .filter(move |face| is_visible(face, camera_space))
}
