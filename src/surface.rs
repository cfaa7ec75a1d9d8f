// filepath: src/surface.rs
//! Bounds-checked pixel surface
//!
//! `PixelSurface` owns the host drawing capability and is the only way the
//! sandbox touches pixels. Every coordinate is checked before storage is
//! touched; misses are reported to the diagnostic sink.

use std::rc::Rc;

use crate::color::{Color, ColorInput};
use crate::diagnostics::{Diagnostic, DiagnosticSink, PixelOp};
use crate::draw::DrawingSurface;

pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 240;

pub struct PixelSurface {
    backend: Box<dyn DrawingSurface>,
    width: u32,
    height: u32,
    initial_color: Color,
    diagnostics: Rc<dyn DiagnosticSink>,
}

impl PixelSurface {
    /// Wrap a drawing capability and paint it with `initial_color`.
    ///
    /// The surface takes its extents from the backend and never resizes.
    pub fn new(
        backend: Box<dyn DrawingSurface>,
        initial_color: Color,
        diagnostics: Rc<dyn DiagnosticSink>,
    ) -> Self {
        let (width, height) = backend.size();
        let mut surface = Self {
            backend,
            width,
            height,
            initial_color: initial_color.opaque(),
            diagnostics,
        };
        surface.reset();
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn initial_color(&self) -> Color {
        self.initial_color
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.width as i64 && (y as i64) < self.height as i64
    }

    /// Paint every cell with `color`, ignoring its alpha.
    pub fn fill(&mut self, color: Color) {
        self.backend
            .fill_rect(0, 0, self.width, self.height, color.opaque());
    }

    /// Clear back to the startup fill.
    pub fn reset(&mut self) {
        let color = self.initial_color;
        self.fill(color);
    }

    /// Write one pixel. Returns `false`, leaving the surface untouched, when
    /// `(x, y)` lies outside the surface.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: impl Into<ColorInput>) -> bool {
        if !self.contains(x, y) {
            self.diagnostics.report(Diagnostic::OutOfBounds {
                op: PixelOp::SetPixel,
                x,
                y,
            });
            return false;
        }
        self.backend.put_pixel_block(x, y, color.into().to_bytes());
        true
    }

    /// Read one pixel, or `Color::TRANSPARENT` outside the surface.
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        if !self.contains(x, y) {
            self.diagnostics.report(Diagnostic::OutOfBounds {
                op: PixelOp::GetPixel,
                x,
                y,
            });
            return Color::TRANSPARENT;
        }
        Color::from_bytes(self.backend.read_pixel_block(x, y))
    }

    pub(crate) fn backend_mut(&mut self) -> &mut dyn DrawingSurface {
        self.backend.as_mut()
    }

    pub(crate) fn diagnostics(&self) -> &Rc<dyn DiagnosticSink> {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::{PixelSurface, DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use crate::color::{Color, ColorInput};
    use crate::diagnostics::{CollectingSink, Diagnostic, PixelOp};
    use crate::draw::RasterSurface;
    use std::rc::Rc;

    fn surface_with_sink(width: u32, height: u32) -> (PixelSurface, Rc<CollectingSink>) {
        let sink = Rc::new(CollectingSink::new());
        let surface = PixelSurface::new(
            Box::new(RasterSurface::new(width, height)),
            Color::BLACK,
            sink.clone(),
        );
        (surface, sink)
    }

    fn snapshot(surface: &PixelSurface) -> Vec<Color> {
        let mut out = Vec::new();
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                out.push(surface.get_pixel(x, y));
            }
        }
        out
    }

    #[test]
    fn starts_filled_with_initial_color() {
        let (surface, _) = surface_with_sink(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(surface.width(), 320);
        assert_eq!(surface.height(), 240);
        assert_eq!(surface.get_pixel(0, 0), Color::BLACK);
        assert_eq!(surface.get_pixel(319, 239), Color::BLACK);
    }

    #[test]
    fn set_then_get_returns_clamped_channels() {
        let (mut surface, sink) = surface_with_sink(16, 16);
        assert!(surface.set_pixel(3, 4, ColorInput::rgba(300.0, -2.0, 17.4, 0.5)));
        let c = surface.get_pixel(3, 4);
        assert_eq!((c.r, c.g, c.b), (255, 0, 17));
        assert_eq!(c.a, 128.0 / 255.0);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn set_pixel_accepts_colors() {
        let (mut surface, _) = surface_with_sink(4, 4);
        let c = Color::new(10.0, 20.0, 30.0, 1.0);
        assert!(surface.set_pixel(0, 0, c));
        assert_eq!(surface.get_pixel(0, 0), c);
    }

    #[test]
    fn missing_alpha_defaults_opaque_and_zero_stays_zero() {
        let (mut surface, _) = surface_with_sink(4, 4);
        surface.set_pixel(0, 0, ColorInput::rgb(1.0, 2.0, 3.0));
        surface.set_pixel(1, 0, ColorInput::rgba(1.0, 2.0, 3.0, 0.0));
        assert_eq!(surface.get_pixel(0, 0).a, 1.0);
        assert_eq!(surface.get_pixel(1, 0).a, 0.0);
    }

    #[test]
    fn out_of_bounds_writes_fail_and_leave_surface_alone() {
        let (mut surface, sink) = surface_with_sink(8, 6);
        let before = snapshot(&surface);
        sink.clear();

        let misses = [(-1, 0), (0, -1), (8, 0), (0, 6), (8, 6), (i32::MIN, i32::MAX)];
        for &(x, y) in &misses {
            assert!(!surface.set_pixel(x, y, Color::from_hex(0xffffff)));
        }

        assert_eq!(snapshot(&surface), before);
        let entries = sink.entries();
        assert_eq!(entries.len(), misses.len());
        assert_eq!(
            entries[0],
            Diagnostic::OutOfBounds {
                op: PixelOp::SetPixel,
                x: -1,
                y: 0
            }
        );
    }

    #[test]
    fn out_of_bounds_reads_return_sentinel() {
        let (surface, sink) = surface_with_sink(8, 6);
        for &(x, y) in &[(-1, 3), (3, -1), (8, 3), (3, 6)] {
            assert_eq!(surface.get_pixel(x, y), Color::TRANSPARENT);
        }
        assert!(sink.entries().iter().all(|d| matches!(
            d,
            Diagnostic::OutOfBounds {
                op: PixelOp::GetPixel,
                ..
            }
        )));
        assert_eq!(sink.entries().len(), 4);
    }

    #[test]
    fn fill_ignores_alpha() {
        let (mut surface, _) = surface_with_sink(4, 4);
        surface.fill(Color::from_hex(0x336699).with_alpha(0.1));
        assert_eq!(surface.get_pixel(2, 2), Color::from_hex(0x336699));
    }

    #[test]
    fn reset_restores_initial_fill() {
        let sink = Rc::new(CollectingSink::new());
        let start = Color::from_hex(0x102030);
        let mut surface =
            PixelSurface::new(Box::new(RasterSurface::new(10, 10)), start, sink.clone());
        surface.set_pixel(5, 5, Color::from_hex(0xffffff));
        surface.fill(Color::from_hex(0x00ff00));
        surface.reset();
        surface.reset();
        assert!(snapshot(&surface).iter().all(|&c| c == start));
    }
}
