// filepath: src/draw.rs
//! Drawing capability for the pixel sandbox
//!
//! `DrawingSurface` is the host 2D context the sandbox paints through:
//! solid rectangles, raw pixel blocks and simple line paths.
//! `RasterSurface` is the in-memory implementation over an RGBA buffer,
//! used by the binary and the tests.

use crate::color::Color;

/// Host drawing capability.
///
/// Coordinates passed here are not bounds-checked by the caller; an
/// implementation clips whatever falls outside its extents.
pub trait DrawingSurface {
    /// Size of the backing buffer in pixels.
    fn size(&self) -> (u32, u32);

    /// Paint a rectangle, blending by the color's alpha.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color);

    /// Replace one pixel's RGBA bytes, no blending.
    fn put_pixel_block(&mut self, x: i32, y: i32, bytes: [u8; 4]);

    fn read_pixel_block(&self, x: i32, y: i32) -> [u8; 4];

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn set_stroke_style(&mut self, color: Color);
    fn set_fill_style(&mut self, color: Color);
    fn stroke(&mut self);
    fn fill(&mut self);
}

/// RGBA8 buffer with a current path, in the manner of a 2D canvas context.
pub struct RasterSurface {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    subpaths: Vec<Vec<(f64, f64)>>,
    stroke_style: Color,
    fill_style: Color,
}

impl RasterSurface {
    /// Create a fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: vec![0; width as usize * height as usize * 4],
            width,
            height,
            subpaths: Vec::new(),
            stroke_style: Color::BLACK,
            fill_style: Color::BLACK,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA rows, top to bottom
    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Source-over blend of `color` onto one pixel.
    fn blend(&mut self, x: i32, y: i32, color: Color) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let sa = color.a;
        if sa <= 0.0 {
            return;
        }
        if sa >= 1.0 {
            self.buffer[idx..idx + 4].copy_from_slice(&color.to_bytes());
            return;
        }

        let dst = &mut self.buffer[idx..idx + 4];
        let da = dst[3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| -> u8 {
            let v = (s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        let (r, g, b) = (mix(color.r, dst[0]), mix(color.g, dst[1]), mix(color.b, dst[2]));
        dst[0] = r;
        dst[1] = g;
        dst[2] = b;
        dst[3] = (out_a * 255.0).round() as u8;
    }

    /// Clip a segment to the buffer box `[0, w] x [0, h]` (Liang-Barsky).
    ///
    /// Returns the clipped endpoints and whether the far end was cut off, or
    /// `None` when nothing of the segment is inside or a coordinate is not
    /// finite.
    fn clip_segment(
        &self,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Option<((f64, f64), (f64, f64), bool)> {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        if ![from.0, from.1, dx, dy].iter().all(|v| v.is_finite()) {
            return None;
        }

        let (w, h) = (self.width as f64, self.height as f64);
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [(-dx, from.0), (dx, w - from.0), (-dy, from.1), (dy, h - from.1)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
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

        let start = (from.0 + t0 * dx, from.1 + t0 * dy);
        let end = (from.0 + t1 * dx, from.1 + t1 * dy);
        Some((start, end, t1 < 1.0))
    }

    /// Bresenham segment, leaving out the end pixel unless the segment runs
    /// off the buffer.
    fn draw_segment(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let Some((from, to, cut)) = self.clip_segment(from, to) else {
            return;
        };

        // Clipped points lie in [0, w] x [0, h]; the far edge maps to the last pixel
        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        let pixel = |p: (f64, f64)| {
            (
                (p.0.floor() as i64).clamp(0, max_x),
                (p.1.floor() as i64).clamp(0, max_y),
            )
        };
        let (mut x0, mut y0) = pixel(from);
        let (x1, y1) = pixel(to);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        while x0 != x1 || y0 != y1 {
            self.blend(x0 as i32, y0 as i32, color);
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
        if cut {
            self.blend(x1 as i32, y1 as i32, color);
        }
    }

    /// Edges of every subpath, each implicitly closed.
    fn edges(&self) -> Vec<((f64, f64), (f64, f64))> {
        let mut edges = Vec::new();
        for sub in &self.subpaths {
            if sub.len() < 2 {
                continue;
            }
            for pair in sub.windows(2) {
                edges.push((pair[0], pair[1]));
            }
            let (first, last) = (sub[0], sub[sub.len() - 1]);
            if first != last {
                edges.push((last, first));
            }
        }
        edges
    }
}

impl DrawingSurface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        // Clip the rectangle to the buffer
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = x.saturating_add(width as i32).min(self.width as i32);
        let y_end = y.saturating_add(height as i32).min(self.height as i32);

        if x_end <= x_start || y_end <= y_start {
            return;
        }

        for py in y_start..y_end {
            for px in x_start..x_end {
                self.blend(px, py, color);
            }
        }
    }

    fn put_pixel_block(&mut self, x: i32, y: i32, bytes: [u8; 4]) {
        if let Some(idx) = self.index(x, y) {
            self.buffer[idx..idx + 4].copy_from_slice(&bytes);
        }
    }

    fn read_pixel_block(&self, x: i32, y: i32) -> [u8; 4] {
        match self.index(x, y) {
            Some(idx) => [
                self.buffer[idx],
                self.buffer[idx + 1],
                self.buffer[idx + 2],
                self.buffer[idx + 3],
            ],
            None => [0; 4],
        }
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.subpaths.last_mut() {
            Some(sub) => sub.push((x, y)),
            // No current point: behaves as a move
            None => self.subpaths.push(vec![(x, y)]),
        }
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.stroke_style = color;
    }

    fn set_fill_style(&mut self, color: Color) {
        self.fill_style = color;
    }

    fn stroke(&mut self) {
        let color = self.stroke_style;
        if color.a <= 0.0 {
            return;
        }
        let subpaths = self.subpaths.clone();
        for sub in &subpaths {
            for pair in sub.windows(2) {
                self.draw_segment(pair[0], pair[1], color);
            }
            // Open paths still get their final pixel
            if let Some(&last) = sub.last() {
                if sub.len() == 1 || sub[0] != last {
                    self.blend(last.0.floor() as i32, last.1.floor() as i32, color);
                }
            }
        }
    }

    /// Scanline fill with the non-zero winding rule, sampling pixel centers.
    fn fill(&mut self) {
        let color = self.fill_style;
        if color.a <= 0.0 {
            return;
        }
        let edges = self.edges();
        if edges.is_empty() {
            return;
        }

        let (min_y, max_y) = edges.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (a, b)| {
            (lo.min(a.1).min(b.1), hi.max(a.1).max(b.1))
        });
        let y_start = (min_y.floor() as i32).max(0);
        let y_end = (max_y.ceil() as i32).min(self.height as i32);

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for py in y_start..y_end {
            let sample_y = py as f64 + 0.5;
            crossings.clear();
            for &((x0, y0), (x1, y1)) in &edges {
                let upward = y0 <= sample_y && y1 > sample_y;
                let downward = y1 <= sample_y && y0 > sample_y;
                if upward || downward {
                    let t = (sample_y - y0) / (y1 - y0);
                    crossings.push((x0 + t * (x1 - x0), if upward { 1 } else { -1 }));
                }
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for i in 0..crossings.len().saturating_sub(1) {
                winding += crossings[i].1;
                if winding == 0 {
                    continue;
                }
                let span_start = ((crossings[i].0 - 0.5).ceil() as i32).max(0);
                let span_end = ((crossings[i + 1].0 - 0.5).ceil() as i32).min(self.width as i32);
                for px in span_start..span_end {
                    self.blend(px, py, color);
                }
            }
        }
    }
}
