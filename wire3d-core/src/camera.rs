/// First-person camera state and its per-frame update from input
use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point3, Vector3};

use crate::config::ViewerConfig;

/// Movement keys held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Input sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub keys: MovementKeys,
    /// Net scroll steps since the previous frame.
    pub scroll: f64,
    /// Pointer motion in pixels since the previous frame.
    pub mouse_delta: (f64, f64),
}

/// Free-flying camera: world position, azimuth/altitude in radians and
/// movement speed in world units per millisecond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Point3<f64>,
    pub azi: f64,
    pub alt: f64,
    pub speed: f64,
}

impl CameraState {
    /// Camera at the origin looking down -z.
    pub fn new(speed: f64) -> Self {
        Self {
            position: Point3::origin(),
            azi: 0.0,
            alt: 0.0,
            speed,
        }
    }

    /// Advance one frame: scroll, then movement, then look.
    pub fn update(&mut self, elapsed_ms: f64, input: &FrameInput, config: &ViewerConfig) {
        self.apply_scroll(input.scroll, config.scroll_factor);
        self.apply_movement(elapsed_ms, &input.keys);
        self.apply_look(input.mouse_delta, config.mouse_sensitivity);
    }

    /// Speed scales exponentially with scroll and is deliberately unbounded.
    pub fn apply_scroll(&mut self, scroll: f64, factor: f64) {
        if scroll != 0.0 {
            self.speed *= factor.powf(scroll);
        }
    }

    /// Horizontal moves follow the azimuth only; looking up or down never
    /// lifts the camera. Vertical moves are along world y.
    pub fn apply_movement(&mut self, elapsed_ms: f64, keys: &MovementKeys) {
        let step = elapsed_ms * self.speed;
        let (sin_azi, cos_azi) = self.azi.sin_cos();
        let strafe = Vector3::new(cos_azi, 0.0, sin_azi);
        let forward = Vector3::new(sin_azi, 0.0, -cos_azi);

        if keys.right {
            self.position += strafe * step;
        }
        if keys.left {
            self.position -= strafe * step;
        }
        if keys.forward {
            self.position += forward * step;
        }
        if keys.backward {
            self.position -= forward * step;
        }
        if keys.up {
            self.position.y += step;
        }
        if keys.down {
            self.position.y -= step;
        }
    }

    /// Turn by a pointer delta, keeping altitude within straight up/down.
    pub fn apply_look(&mut self, (dx, dy): (f64, f64), sensitivity: f64) {
        self.azi += sensitivity * dx;
        self.alt += sensitivity * -dy;
        self.alt = self.alt.clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(ViewerConfig::default().initial_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(keys: MovementKeys) -> FrameInput {
        FrameInput {
            keys,
            ..Default::default()
        }
    }

    #[test]
    fn test_forward_moves_along_negative_z() {
        let mut camera = CameraState::new(0.01);
        let input = holding(MovementKeys {
            forward: true,
            ..Default::default()
        });
        camera.update(1000.0, &input, &ViewerConfig::default());

        assert!(camera.position.x.abs() < 1e-9);
        assert!(camera.position.y.abs() < 1e-9);
        assert!((camera.position.z + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_strafe_follows_azimuth() {
        let mut camera = CameraState::new(1.0);
        camera.azi = FRAC_PI_2;
        camera.apply_movement(
            2.0,
            &MovementKeys {
                right: true,
                ..Default::default()
            },
        );
        assert!(camera.position.x.abs() < 1e-9);
        assert!((camera.position.z - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_forward_ignores_altitude() {
        let mut camera = CameraState::new(1.0);
        camera.alt = 1.0;
        camera.apply_movement(
            3.0,
            &MovementKeys {
                forward: true,
                ..Default::default()
            },
        );
        assert_eq!(camera.position.y, 0.0);
        assert!((camera.position.z + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut camera = CameraState::new(0.5);
        camera.azi = 0.7;
        let keys = MovementKeys {
            forward: true,
            backward: true,
            left: true,
            right: true,
            up: true,
            down: true,
        };
        camera.apply_movement(16.0, &keys);
        assert!(camera.position.coords.norm() < 1e-9);
    }

    #[test]
    fn test_vertical_keys_move_world_y() {
        let mut camera = CameraState::new(0.01);
        camera.azi = 1.2;
        camera.alt = -0.4;
        camera.apply_movement(
            100.0,
            &MovementKeys {
                up: true,
                ..Default::default()
            },
        );
        assert!((camera.position.y - 1.0).abs() < 1e-9);
        assert_eq!(camera.position.x, 0.0);
        assert_eq!(camera.position.z, 0.0);
    }

    #[test]
    fn test_scroll_scales_speed() {
        let mut camera = CameraState::new(0.01);
        camera.apply_scroll(1.0, 1.1);
        assert!((camera.speed - 0.011).abs() < 1e-12);

        camera.apply_scroll(-2.0, 1.1);
        assert!((camera.speed - 0.01 / 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_mouse_turns_camera() {
        let mut camera = CameraState::default();
        camera.apply_look((100.0, 50.0), 0.002);
        assert!((camera.azi - 0.2).abs() < 1e-12);
        assert!((camera.alt + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_altitude_stays_clamped() {
        let mut camera = CameraState::default();
        let deltas = [-5000.0, 300.0, 12000.0, -1.0, 0.0, -40000.0, 25.0];
        for dy in deltas {
            camera.apply_look((0.0, dy), 0.002);
            assert!(camera.alt >= -FRAC_PI_2 && camera.alt <= FRAC_PI_2);
        }

        camera.apply_look((0.0, -1.0e9), 0.002);
        assert_eq!(camera.alt, FRAC_PI_2);
        camera.apply_look((0.0, 1.0e9), 0.002);
        assert_eq!(camera.alt, -FRAC_PI_2);
    }

    #[test]
    fn test_no_input_no_change() {
        let mut camera = CameraState::new(0.02);
        let before = camera;
        camera.update(16.0, &FrameInput::default(), &ViewerConfig::default());
        assert_eq!(camera, before);
    }
}
