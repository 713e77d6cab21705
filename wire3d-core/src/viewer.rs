/// The per-frame loop: sample input, move the camera, draw, present
use tracing::{info, trace};

use crate::camera::{CameraState, FrameInput};
use crate::config::ViewerConfig;
use crate::device::{Display, FrameClock, InputEvent, InputSource};
use crate::error::{DeviceError, Error};
use crate::geometry::Mesh;
use crate::projection::Projection;
use crate::raster::{Rasterizer, Surface};

/// What happened during one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    Presented(FrameStats),
    Terminated,
}

/// Per-frame figures reported to the frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Time since the previous frame, as used for movement.
    pub elapsed_ms: f64,
    pub triangles_drawn: usize,
    pub camera: CameraState,
}

/// Wireframe viewer over a fixed mesh and window size.
pub struct Viewer<D, I, C> {
    mesh: Mesh,
    config: ViewerConfig,
    camera: CameraState,
    projection: Projection,
    window: Surface,
    overlay: Surface,
    display: D,
    input: I,
    clock: C,
}

impl<D: Display, I: InputSource, C: FrameClock> Viewer<D, I, C> {
    pub fn new(
        mesh: Mesh,
        config: ViewerConfig,
        display: D,
        input: I,
        clock: C,
    ) -> Result<Self, Error> {
        config.validate()?;

        let (width, height) = display.size();
        if width == 0 || height == 0 {
            return Err(DeviceError::EmptyDisplay { width, height }.into());
        }

        let projection = Projection::new(config.fov_radians(), width, height);
        let window = Surface::new(width as usize, height as usize, config.background);
        let overlay = Surface::new(width as usize, height as usize, config.colorkey)
            .with_colorkey(config.colorkey);
        info!(
            width,
            height,
            fov = config.fov_degrees,
            faces = mesh.faces().len(),
            "viewer ready"
        );

        Ok(Self {
            mesh,
            camera: CameraState::new(config.initial_speed),
            config,
            projection,
            window,
            overlay,
            display,
            input,
            clock,
        })
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Run frames until the input source asks to terminate.
    pub fn run(&mut self) -> Result<(), Error> {
        while let FrameStatus::Presented(_) = self.frame()? {}
        Ok(())
    }

    /// One iteration: pace, drain events, update the camera, draw and present.
    pub fn frame(&mut self) -> Result<FrameStatus, Error> {
        let elapsed_ms = self.clock.tick(self.config.target_fps);

        let mut scroll = 0.0;
        for event in self.input.poll_events()? {
            match event {
                InputEvent::Scroll(steps) => scroll += steps,
                InputEvent::Terminate => {
                    info!("termination requested");
                    return Ok(FrameStatus::Terminated);
                }
            }
        }

        let input = FrameInput {
            keys: self.input.held_keys(),
            scroll,
            mouse_delta: self.input.take_mouse_delta(),
        };
        self.camera.update(elapsed_ms, &input, &self.config);

        let triangles_drawn = self.render();
        self.display.present(&self.window)?;
        trace!(elapsed_ms, triangles_drawn, "frame presented");

        Ok(FrameStatus::Presented(FrameStats {
            elapsed_ms,
            triangles_drawn,
            camera: self.camera,
        }))
    }

    /// Draw the mesh for the current camera into the window surface.
    fn render(&mut self) -> usize {
        self.overlay.fill(self.config.colorkey);
        self.window.fill(self.config.background);

        let transformed = self.projection.transform(&self.camera, self.mesh.vertices());
        let drawn = Rasterizer::draw_wireframe(
            &mut self.overlay,
            self.mesh.faces(),
            &transformed,
            self.config.foreground,
            self.config.line_width,
        );

        self.window.blit(&self.overlay);
        drawn
    }
}
