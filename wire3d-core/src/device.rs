/// Contracts for the window, input and timing collaborators the viewer drives
use crate::camera::MovementKeys;
use crate::error::DeviceError;
use crate::raster::Surface;

/// Discrete input events drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Scroll wheel steps, positive away from the user.
    Scroll(f64),
    /// The host asked the process to stop.
    Terminate,
}

/// The window the finished frame is shown on.
pub trait Display {
    /// Drawable size in pixels.
    fn size(&self) -> (u32, u32);

    /// Show a completed frame.
    fn present(&mut self, frame: &Surface) -> Result<(), DeviceError>;
}

/// Point-in-time samples of keyboard and pointer state.
pub trait InputSource {
    /// Drain every pending event without blocking.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, DeviceError>;

    /// Movement keys held right now.
    fn held_keys(&self) -> MovementKeys;

    /// Pointer motion in pixels since the previous call.
    fn take_mouse_delta(&mut self) -> (f64, f64);
}

/// Frame pacing.
pub trait FrameClock {
    /// Wait as needed to cap the loop at `target_fps`, then return the
    /// milliseconds elapsed since the previous tick.
    fn tick(&mut self, target_fps: u32) -> f64;
}
