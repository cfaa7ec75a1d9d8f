// filepath: src/routine/interface.rs
//! Routine interface definitions
//!
//! A routine is user drawing code. The sandbox creates a fresh routine for
//! every run and calls `main` once with a `DrawContext`.

use crate::color::{Color, ColorInput};
use crate::error::DrawError;
use crate::path::PathRenderer;
use crate::surface::PixelSurface;

/// Drawing API handed to a routine for the length of one run.
pub struct DrawContext<'a> {
    surface: &'a mut PixelSurface,
    renderer: &'a PathRenderer,
}

impl<'a> DrawContext<'a> {
    pub fn new(surface: &'a mut PixelSurface, renderer: &'a PathRenderer) -> Self {
        Self { surface, renderer }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Clamped color, see [`Color::new`].
    pub fn color(&self, r: f64, g: f64, b: f64, a: f64) -> Color {
        Color::new(r, g, b, a)
    }

    pub fn hex(&self, color: Color) -> String {
        color.to_hex()
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: impl Into<ColorInput>) -> bool {
        self.surface.set_pixel(x, y, color)
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.surface.get_pixel(x, y)
    }

    /// Draw a polygon from a flat `[x0, y0, x1, y1, ...]` list.
    pub fn add_poly(&mut self, color: Color, alpha: f64, path: &[f64]) -> Result<(), DrawError> {
        self.renderer.add_poly(self.surface, color, alpha, path)
    }
}

/// User drawing routine
pub trait Routine {
    /// Registry key, also used for the routine's config table
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Configure the routine before it runs
    fn init(&mut self, _config: &toml::Table) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    /// Entry point, called once per run
    fn main(&mut self, ctx: &mut DrawContext) -> Result<(), Box<dyn std::error::Error>>;
}

pub type RoutineCreateFn = fn() -> Box<dyn Routine>;
