/// Model file parser for `v` vertex and triangular `f` face records
///
/// Every other line (normals, texture coordinates, groups, comments) is
/// skipped. Faces keep only the leading vertex index of each `index/...`
/// corner token.
use std::fs;
use std::path::Path;

use nom::{
    character::complete::{char, i64 as integer},
    combinator::{all_consuming, opt, rest},
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};
use tracing::{debug, info};

use crate::error::ModelError;
use crate::geometry::{Mesh, Vertex};

const VERTEX_TAG: &str = "v ";
const FACE_TAG: &str = "f ";

/// Read and parse a model file.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, ModelError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse_obj(&text)?;
    info!(
        path = %path.display(),
        vertices = mesh.vertices().len(),
        faces = mesh.faces().len(),
        "loaded model"
    );
    Ok(mesh)
}

/// Parse model text into a mesh.
///
/// A counting pass sizes the vertex and face arrays exactly, then a second
/// pass fills them in file order. The first malformed record aborts the load.
pub fn parse_obj(input: &str) -> Result<Mesh, ModelError> {
    let (vertex_count, face_count) = count_records(input);
    debug!(vertex_count, face_count, "counted model records");

    let mut vertices = Vec::with_capacity(vertex_count);
    let mut faces = Vec::with_capacity(face_count);

    for (n, line) in input.lines().enumerate() {
        let line_no = n + 1;
        if let Some(fields) = line.strip_prefix(VERTEX_TAG) {
            vertices.push(parse_vertex(fields, line_no)?);
        } else if let Some(fields) = line.strip_prefix(FACE_TAG) {
            faces.push((line_no, parse_face(fields, line_no)?));
        }
    }

    Mesh::from_records(vertices, faces)
}

fn count_records(input: &str) -> (usize, usize) {
    input.lines().fold((0, 0), |(v, f), line| {
        if line.starts_with(VERTEX_TAG) {
            (v + 1, f)
        } else if line.starts_with(FACE_TAG) {
            (v, f + 1)
        } else {
            (v, f)
        }
    })
}

fn parse_vertex(fields: &str, line: usize) -> Result<Vertex, ModelError> {
    let tokens: Vec<&str> = fields.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(ModelError::VertexArity {
            line,
            found: tokens.len(),
        });
    }

    let mut xyz = [0.0; 3];
    for (slot, token) in xyz.iter_mut().zip(&tokens) {
        *slot = match coordinate(token) {
            Ok((_, value)) => value,
            Err(_) => {
                return Err(ModelError::InvalidNumber {
                    line,
                    token: token.to_string(),
                })
            }
        };
    }

    Ok(Vertex::new(xyz[0], xyz[1], xyz[2]))
}

/// Raw corner indices; range checks happen when the mesh is assembled.
fn parse_face(fields: &str, line: usize) -> Result<[i64; 3], ModelError> {
    let tokens: Vec<&str> = fields.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(ModelError::FaceArity {
            line,
            found: tokens.len(),
        });
    }

    let mut indices = [0i64; 3];
    for (slot, token) in indices.iter_mut().zip(&tokens) {
        *slot = match corner_index(token) {
            Ok((_, index)) => index,
            Err(_) => {
                return Err(ModelError::InvalidNumber {
                    line,
                    token: token.to_string(),
                })
            }
        };
    }

    Ok(indices)
}

fn coordinate(input: &str) -> IResult<&str, f64> {
    all_consuming(double)(input)
}

/// Leading vertex index of a `v`, `v/vt`, `v//vn` or `v/vt/vn` corner.
fn corner_index(input: &str) -> IResult<&str, i64> {
    all_consuming(terminated(integer, opt(preceded(char('/'), rest))))(input)
}
