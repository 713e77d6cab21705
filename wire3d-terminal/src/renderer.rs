/// Half-block terminal display for wireframe frames
use crossterm::{
    cursor,
    style::{Color, Colors, Print, ResetColor, SetColors, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{DeviceError, Display, FrameStats, Rgb, Surface};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '\u{2580}';

/// Shows surfaces on a terminal, two vertically stacked pixels per cell.
pub struct TerminalDisplay<W: Write> {
    writer: W,
    columns: u16,
    rows: u16,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(writer: W, columns: u16, rows: u16) -> Self {
        Self {
            writer,
            columns,
            rows,
        }
    }

    /// Overlay a one-line status readout on the top row.
    pub fn show_status(&mut self, stats: &FrameStats, fps: f32) -> Result<(), DeviceError> {
        let camera = &stats.camera;
        let mut line = format!(
            "wire3d | FPS: {:.1} ({:.1} ms) | pos ({:.2}, {:.2}, {:.2}) | speed {:.4} | {} tris | WASD/Space/C move, mouse/arrows look, wheel speed",
            fps,
            stats.elapsed_ms,
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.speed,
            stats.triangles_drawn,
        );
        if let Some((cut, _)) = line.char_indices().nth(self.columns as usize) {
            line.truncate(cut);
        }

        self.writer
            .queue(cursor::MoveTo(0, 0))?
            .queue(SetForegroundColor(Color::Yellow))?
            .queue(Print(line))?
            .queue(ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn size(&self) -> (u32, u32) {
        (self.columns as u32, self.rows as u32 * 2)
    }

    fn present(&mut self, frame: &Surface) -> Result<(), DeviceError> {
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 0..self.rows {
            self.writer.queue(cursor::MoveTo(0, row))?;
            let top_y = row as usize * 2;
            for x in 0..self.columns as usize {
                let top = frame.pixel(x, top_y).unwrap_or(Rgb::BLACK);
                let bottom = frame.pixel(x, top_y + 1).unwrap_or(Rgb::BLACK);

                if current != Some((top, bottom)) {
                    self.writer
                        .queue(SetColors(Colors::new(color(top), color(bottom))))?;
                    current = Some((top, bottom));
                }
                self.writer.queue(Print(HALF_BLOCK))?;
            }
        }

        self.writer.queue(ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::CameraState;

    #[test]
    fn test_size_doubles_rows() {
        let display = TerminalDisplay::new(Vec::new(), 80, 24);
        assert_eq!(display.size(), (80, 48));
    }

    #[test]
    fn test_present_fills_every_cell() {
        let mut display = TerminalDisplay::new(Vec::new(), 6, 3);
        let mut frame = Surface::new(6, 6, Rgb::WHITE);
        frame.set_pixel(2, 3, Rgb::BLACK);
        display.present(&frame).unwrap();

        let output = String::from_utf8(display.writer.clone()).unwrap();
        assert_eq!(output.matches(HALF_BLOCK).count(), 18);
        // white cells, then the cell holding the black pixel, then white again
        assert!(output.contains("38;2;255;255;255"));
        assert!(output.contains("48;2;0;0;0"));
    }

    #[test]
    fn test_status_is_truncated_to_width() {
        let mut display = TerminalDisplay::new(Vec::new(), 10, 2);
        let stats = FrameStats {
            elapsed_ms: 16.0,
            triangles_drawn: 3,
            camera: CameraState::default(),
        };
        display.show_status(&stats, 60.0).unwrap();

        let output = String::from_utf8(display.writer.clone()).unwrap();
        assert!(output.contains("wire3d | "));
        assert!(!output.contains("FPS"));
    }

    #[test]
    fn test_status_reports_frame_time() {
        let mut display = TerminalDisplay::new(Vec::new(), 200, 2);
        let stats = FrameStats {
            elapsed_ms: 16.5,
            triangles_drawn: 12,
            camera: CameraState::default(),
        };
        display.show_status(&stats, 60.0).unwrap();

        let output = String::from_utf8(display.writer.clone()).unwrap();
        assert!(output.contains("FPS: 60.0 (16.5 ms)"));
        assert!(output.contains("12 tris"));
    }
}
