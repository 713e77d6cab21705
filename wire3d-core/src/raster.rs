/// Software surfaces and wireframe rasterization
use nalgebra::Point2;

use crate::geometry::Face;
use crate::projection::TransformedVertices;
use crate::visibility::visible_faces;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A row-major pixel grid.
///
/// A surface with a colorkey treats pixels of that color as transparent when
/// it is blitted onto another surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    colorkey: Option<Rgb>,
}

impl Surface {
    pub fn new(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
            colorkey: None,
        }
    }

    pub fn with_colorkey(mut self, key: Rgb) -> Self {
        self.colorkey = Some(key);
        self
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Rows of pixels, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.width.max(1))
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Pixels outside the surface are ignored.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Composite `source` onto this surface at the origin, skipping the
    /// source's colorkey pixels.
    pub fn blit(&mut self, source: &Surface) {
        let width = self.width.min(source.width);
        let height = self.height.min(source.height);
        for y in 0..height {
            let src = &source.pixels[y * source.width..y * source.width + width];
            let dst = &mut self.pixels[y * self.width..y * self.width + width];
            for (d, &s) in dst.iter_mut().zip(src) {
                if Some(s) != source.colorkey {
                    *d = s;
                }
            }
        }
    }

    /// Draw a straight line `width` pixels thick.
    ///
    /// The segment is clipped to the surface first, so far off-screen
    /// endpoints cost no more than on-screen ones.
    pub fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Rgb, width: u32) {
        let pad = width as f64;
        let min = Point2::new(-pad, -pad);
        let max = Point2::new(self.width as f64 - 1.0 + pad, self.height as f64 - 1.0 + pad);
        let Some((from, to)) = clip_segment(from, to, min, max) else {
            return;
        };

        let (x0, y0) = (from.x.round() as i64, from.y.round() as i64);
        let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let low = -((width as i64 - 1) / 2);
        let high = width as i64 / 2;

        for offset in low..=high {
            if steep {
                self.bresenham(x0 + offset, y0, x1 + offset, y1, color);
            } else {
                self.bresenham(x0, y0 + offset, x1, y1 + offset, color);
            }
        }
    }

    /// Outline a closed polygon, joining the last point back to the first.
    pub fn draw_polygon_outline(&mut self, points: &[Point2<f64>], color: Rgb, width: u32) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.draw_line(from, to, color, width);
        }
    }

    fn bresenham(&mut self, mut x0: i64, mut y0: i64, x1: i64, y1: i64, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// Liang-Barsky clip of a segment against an axis-aligned box.
fn clip_segment(
    p0: Point2<f64>,
    p1: Point2<f64>,
    min: Point2<f64>,
    max: Point2<f64>,
) -> Option<(Point2<f64>, Point2<f64>)> {
    if !(p0.x.is_finite() && p0.y.is_finite() && p1.x.is_finite() && p1.y.is_finite()) {
        return None;
    }

    let d = p1 - p0;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    let edges = [
        (-d.x, p0.x - min.x),
        (d.x, max.x - p0.x),
        (-d.y, p0.y - min.y),
        (d.y, max.y - p0.y),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    Some((p0 + d * t0, p0 + d * t1))
}

/// Draws mesh edges for the triangles that survive near-plane culling
pub struct Rasterizer;

impl Rasterizer {
    /// Outline each visible face in winding order. Returns the number of
    /// triangles drawn.
    pub fn draw_wireframe(
        surface: &mut Surface,
        faces: &[Face],
        transformed: &TransformedVertices,
        color: Rgb,
        width: u32,
    ) -> usize {
        let mut drawn = 0;
        for face in visible_faces(faces, &transformed.camera_space) {
            let corners = face.corners().map(|i| transformed.screen[i]);
            surface.draw_polygon_outline(&corners, color, width);
            drawn += 1;
        }
        drawn
    }
}
