/// Error types for model loading and device access
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A model file that could not be read or does not follow the `v`/`f` grammar.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: vertex record needs 3 coordinates, found {found}")]
    VertexArity { line: usize, found: usize },

    #[error("line {line}: face record needs 3 corners, found {found}")]
    FaceArity { line: usize, found: usize },

    #[error("line {line}: expected a number, found `{token}`")]
    InvalidNumber { line: usize, token: String },

    /// `line` is the face's source line, or its 1-based position for meshes
    /// built in code.
    #[error("line {line}: face index {index} is outside 1..={vertex_count}")]
    IndexOutOfRange {
        line: usize,
        index: i64,
        vertex_count: usize,
    },
}

/// The display, input or timing device is unusable.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("display has no drawable area ({width}x{height})")]
    EmptyDisplay { width: u32, height: u32 },

    #[error("invalid viewer configuration: {0}")]
    InvalidConfig(String),
}

/// Any fatal error raised by the viewer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Device(#[from] DeviceError),
}
