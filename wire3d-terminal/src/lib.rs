/// Terminal frontend for the wireframe viewer
use crossterm::terminal;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use wire3d_core::{DeviceError, Error, FrameStatus, Mesh, Viewer, ViewerConfig};

pub mod clock;
pub mod input;
pub mod renderer;
pub mod session;

pub use clock::SleepClock;
pub use input::TerminalInput;
pub use renderer::TerminalDisplay;
pub use session::{with_restored, RawTerminal, TerminalMode};

/// Terminal-specific input and overlay settings
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalConfig {
    /// Pixels of pointer motion per cell moved, horizontally and vertically.
    pub cell_pixels: (f64, f64),
    /// Arrow-key turning in pointer pixels per millisecond.
    pub look_rate: f64,
    /// Emulated hold after a first key press. Covers the auto-repeat delay.
    pub initial_hold: Duration,
    /// Emulated hold after an auto-repeat.
    pub repeat_hold: Duration,
    /// Pointer silence after which the next report starts a fresh trail.
    pub pointer_gap: Duration,
    pub show_status: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            cell_pixels: (8.0, 16.0),
            look_rate: 0.5,
            initial_hold: Duration::from_millis(550),
            repeat_hold: Duration::from_millis(100),
            pointer_gap: Duration::from_millis(250),
            show_status: true,
        }
    }
}

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    viewer: Viewer<TerminalDisplay<Stdout>, TerminalInput, SleepClock>,
    show_status: bool,
    release_events: bool,
    last_report: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: ViewerConfig, terminal: TerminalConfig) -> Result<Self, Error> {
        let (columns, rows) = terminal::size().map_err(DeviceError::from)?;
        let release_events = terminal::supports_keyboard_enhancement().unwrap_or_else(|e| {
            debug!(error = %e, "keyboard enhancement query failed");
            false
        });
        info!(columns, rows, release_events, "opening terminal display");

        let show_status = terminal.show_status;
        let viewer = Viewer::new(
            mesh,
            config,
            TerminalDisplay::new(stdout(), columns, rows),
            TerminalInput::new(terminal, release_events),
            SleepClock::new(),
        )?;

        Ok(Self {
            viewer,
            show_status,
            release_events,
            last_report: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Take over the terminal and render until terminated. The terminal is
    /// restored even when entering it or the loop fails.
    pub fn run(&mut self) -> Result<(), Error> {
        let mut mode = RawTerminal::new(self.release_events);
        with_restored(&mut mode, || self.main_loop())
    }

    fn main_loop(&mut self) -> Result<(), Error> {
        loop {
            let stats = match self.viewer.frame()? {
                FrameStatus::Presented(stats) => stats,
                FrameStatus::Terminated => return Ok(()),
            };

            // Update FPS counter
            self.frame_count += 1;
            let now = Instant::now();
            if (now - self.last_report).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_report).as_secs_f32();
                self.frame_count = 0;
                self.last_report = now;
                debug!(fps = self.fps, "frame rate");
            }

            if self.show_status {
                self.viewer.display_mut().show_status(&stats, self.fps)?;
            }
        }
    }
}
