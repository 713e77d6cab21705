/// wire3d core - wireframe software rendering
///
/// Model loading, the first-person camera, the transform and projection
/// pipeline, near-plane culling and edge rasterization. Windowing, input
/// devices and frame pacing are supplied by a frontend through the traits in
/// [`device`].

pub mod camera;
pub mod config;
pub mod device;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod transform;
pub mod viewer;
pub mod visibility;

// Re-export commonly used types
pub use camera::{CameraState, FrameInput, MovementKeys};
pub use config::ViewerConfig;
pub use device::{Display, FrameClock, InputEvent, InputSource};
pub use error::{DeviceError, Error, ModelError};
pub use geometry::{Face, Mesh, Vertex};
pub use obj::{load_obj, parse_obj};
pub use projection::{Projection, TransformedVertices};
pub use raster::{Rasterizer, Rgb, Surface};
pub use transform::Transform;
pub use viewer::{FrameStats, FrameStatus, Viewer};
