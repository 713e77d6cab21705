/// Mesh primitives: vertices, triangular faces and the immutable mesh
use nalgebra::Point3;

use crate::error::ModelError;

/// A model-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f64>,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// A triangle given by three 1-based vertex indices in winding order.
///
/// Faces outside this crate only come out of a validated [`Mesh`], so every
/// index is within the mesh's vertex range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    indices: [u32; 3],
}

impl Face {
    pub(crate) fn new(a: u32, b: u32, c: u32) -> Self {
        debug_assert!(a >= 1 && b >= 1 && c >= 1, "face indices are 1-based");
        Self { indices: [a, b, c] }
    }

    /// Zero-based slots into the vertex array, in winding order.
    pub fn corners(&self) -> [usize; 3] {
        self.indices.map(|i| i as usize - 1)
    }
}

/// A triangle mesh whose faces only reference vertices it owns.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh from raw 1-based index triples, rejecting any index
    /// outside `1..=vertices.len()`. Errors name the face's 1-based position.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<[i64; 3]>) -> Result<Self, ModelError> {
        let numbered = faces
            .into_iter()
            .enumerate()
            .map(|(n, indices)| (n + 1, indices))
            .collect();
        Self::from_records(vertices, numbered)
    }

    /// Build a mesh from faces tagged with the line they were read from.
    pub(crate) fn from_records(
        vertices: Vec<Vertex>,
        records: Vec<(usize, [i64; 3])>,
    ) -> Result<Self, ModelError> {
        let vertex_count = vertices.len();
        let mut faces = Vec::with_capacity(records.len());

        for (line, indices) in records {
            let mut checked = [0u32; 3];
            for (slot, index) in checked.iter_mut().zip(indices) {
                if index < 1 || index as u64 > vertex_count as u64 {
                    return Err(ModelError::IndexOutOfRange {
                        line,
                        index,
                        vertex_count,
                    });
                }
                *slot = index as u32;
            }
            faces.push(Face { indices: checked });
        }

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Create an axis-aligned cube centred on the origin for testing
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Vertex::new(-half, -half, half),
            Vertex::new(half, -half, half),
            Vertex::new(half, half, half),
            Vertex::new(-half, half, half),
            Vertex::new(-half, -half, -half),
            Vertex::new(half, -half, -half),
            Vertex::new(half, half, -half),
            Vertex::new(-half, half, -half),
        ];
        let faces = vec![
            // Front
            Face::new(1, 2, 3),
            Face::new(1, 3, 4),
            // Back
            Face::new(6, 5, 8),
            Face::new(6, 8, 7),
            // Top
            Face::new(4, 3, 7),
            Face::new(4, 7, 8),
            // Bottom
            Face::new(5, 6, 2),
            Face::new(5, 2, 1),
            // Right
            Face::new(2, 6, 7),
            Face::new(2, 7, 3),
            // Left
            Face::new(5, 1, 4),
            Face::new(5, 4, 8),
        ];

        Self { vertices, faces }
    }
}
