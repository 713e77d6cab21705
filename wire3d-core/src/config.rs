/// Viewer tunables
use crate::error::DeviceError;
use crate::raster::Rgb;

/// Settings fixed for the lifetime of a viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Frame-rate cap handed to the clock every frame.
    pub target_fps: u32,
    /// Radians of turn per pixel of mouse motion.
    pub mouse_sensitivity: f64,
    /// Movement speed is multiplied by `scroll_factor ^ scroll` per scroll event.
    pub scroll_factor: f64,
    /// Starting movement speed in world units per millisecond.
    pub initial_speed: f64,
    pub background: Rgb,
    pub foreground: Rgb,
    /// Overlay pixels of this color are transparent when composited.
    pub colorkey: Rgb,
    /// Edge thickness in pixels.
    pub line_width: u32,
}

impl ViewerConfig {
    pub fn fov_radians(&self) -> f64 {
        self.fov_degrees.to_radians()
    }

    pub fn validate(&self) -> Result<(), DeviceError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(DeviceError::InvalidConfig(format!(
                "field of view must be within (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if self.target_fps == 0 {
            return Err(DeviceError::InvalidConfig(
                "target frame rate must be positive".to_string(),
            ));
        }
        if self.line_width == 0 {
            return Err(DeviceError::InvalidConfig(
                "line width must be at least one pixel".to_string(),
            ));
        }
        if self.foreground == self.colorkey {
            return Err(DeviceError::InvalidConfig(
                "foreground color equals the overlay colorkey".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            target_fps: 60,
            mouse_sensitivity: 0.002,
            scroll_factor: 1.1,
            initial_speed: 0.01,
            background: Rgb::WHITE,
            foreground: Rgb::BLACK,
            colorkey: Rgb::WHITE,
            line_width: 1,
        }
    }
}
