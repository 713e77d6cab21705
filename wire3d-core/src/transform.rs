/// World-to-camera rotation matrices
use nalgebra::Matrix3;

/// Rotation builders for the camera's azimuth and altitude
pub struct Transform;

impl Transform {
    /// Rotation about the vertical (y) axis.
    pub fn azimuth_rotation(azi: f64) -> Matrix3<f64> {
        let (sin, cos) = azi.sin_cos();
        Matrix3::new(
            cos, 0.0, sin, //
            0.0, 1.0, 0.0, //
            -sin, 0.0, cos,
        )
    }

    /// Rotation about the horizontal (x) axis.
    pub fn altitude_rotation(angle: f64) -> Matrix3<f64> {
        let (sin, cos) = angle.sin_cos();
        Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, cos, -sin, //
            0.0, sin, cos,
        )
    }

    /// World-to-camera rotation: azimuth first, then altitude.
    ///
    /// Altitude is negated so looking up tilts the world down.
    pub fn rotation_matrix(azi: f64, alt: f64) -> Matrix3<f64> {
        Self::altitude_rotation(-alt) * Self::azimuth_rotation(azi)
    }
}
