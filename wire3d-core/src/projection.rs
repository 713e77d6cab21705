/// Perspective projection from world space to screen pixels
use nalgebra::{Matrix2x3, Point2, Vector2, Vector3};
use tracing::debug;

use crate::camera::CameraState;
use crate::geometry::Vertex;
use crate::transform::Transform;

/// Per-frame vertex buffers, index-aligned with the mesh's vertex array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformedVertices {
    /// Translated and rotated coordinates. The camera looks down -z.
    pub camera_space: Vec<Vector3<f64>>,
    /// Pixel coordinates with the origin at the top-left corner.
    pub screen: Vec<Point2<f64>>,
}

/// Fixed projection for one window size and field of view
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    matrix: Matrix2x3<f64>,
    width: u32,
    height: u32,
}

impl Projection {
    /// `fov` is the field of view in radians.
    pub fn new(fov: f64, width: u32, height: u32) -> Self {
        let aspect = width as f64 / height as f64;
        let focal = (fov / 2.0).tan();
        let matrix = Matrix2x3::new(
            -1.0 / focal, 0.0, 0.0, //
            0.0, aspect / focal, 0.0,
        );
        debug!(fov, width, height, aspect, "built projection");

        Self {
            matrix,
            width,
            height,
        }
    }

    /// Translate, rotate and project every vertex for the given camera.
    pub fn transform(&self, camera: &CameraState, vertices: &[Vertex]) -> TransformedVertices {
        let rotation = Transform::rotation_matrix(camera.azi, camera.alt);

        let camera_space: Vec<Vector3<f64>> = vertices
            .iter()
            .map(|vertex| rotation * (vertex.position - camera.position))
            .collect();
        let screen = camera_space
            .iter()
            .map(|point| self.project_point(point))
            .collect();

        TransformedVertices {
            camera_space,
            screen,
        }
    }

    /// Project one camera-space point to pixels.
    ///
    /// The divide uses `-|z|` so points behind the camera keep their side of
    /// the screen instead of mirroring. Such points are culled before drawing.
    pub fn project_point(&self, point: &Vector3<f64>) -> Point2<f64> {
        let ndc = (self.matrix * point) / -point.z.abs();
        let half = Vector2::new(self.width as f64 / 2.0, self.height as f64 / 2.0);
        Point2::from(ndc.component_mul(&half) + half)
    }
}
