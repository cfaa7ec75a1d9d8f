// filepath: src/path.rs
//! Polygon paths and the renderer that draws them
//!
//! A path comes in as a flat `[x0, y0, x1, y1, ...]` list. It is validated,
//! closed back onto its first vertex if needed, then replayed as
//! `move_to` / `line_to` commands on the drawing capability.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::diagnostics::Diagnostic;
use crate::draw::DrawingSurface;
use crate::error::DrawError;
use crate::surface::PixelSurface;

/// Minimum vertex count for a drawable polygon.
pub const MIN_VERTICES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    vertices: Vec<(f64, f64)>,
}

impl Path {
    /// Parse a flat coordinate list. Needs an even length and at least three
    /// vertices.
    pub fn from_flat(values: &[f64]) -> Result<Self, DrawError> {
        if values.len() % 2 != 0 || values.len() < MIN_VERTICES * 2 {
            return Err(DrawError::MalformedPath { len: values.len() });
        }
        let vertices = values.chunks_exact(2).map(|p| (p[0], p[1])).collect();
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    pub fn is_closed(&self) -> bool {
        self.vertices.first() == self.vertices.last()
    }

    /// Copy of the path ending on its first vertex.
    pub fn auto_closed(&self) -> Path {
        let mut vertices = self.vertices.clone();
        if !self.is_closed() {
            vertices.push(self.vertices[0]);
        }
        Path { vertices }
    }

    pub fn to_flat(&self) -> Vec<f64> {
        self.vertices.iter().flat_map(|&(x, y)| [x, y]).collect()
    }
}

/// How `add_poly` paints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolyStyle {
    /// Stroke and fill with the requested color and alpha.
    #[default]
    Parameters,
    /// Transparent stroke and a fixed translucent orange fill, whatever the
    /// caller asks for.
    Legacy,
}

impl PolyStyle {
    /// Stroke and fill colors for a request.
    pub fn resolve(self, color: Color, alpha: f64) -> (Color, Color) {
        match self {
            PolyStyle::Parameters => {
                let paint = color.with_alpha(alpha);
                (paint, paint)
            }
            PolyStyle::Legacy => (
                Color::TRANSPARENT,
                Color::new(255.0, 100.0, 0.0, 0.5),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathRenderer {
    style: PolyStyle,
}

impl PathRenderer {
    pub fn new(style: PolyStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> PolyStyle {
        self.style
    }

    /// Validate, close and draw a polygon on the surface.
    ///
    /// A malformed path is reported and rejected before any drawing command
    /// is issued.
    pub fn add_poly(
        &self,
        surface: &mut PixelSurface,
        color: Color,
        alpha: f64,
        values: &[f64],
    ) -> Result<(), DrawError> {
        let path = match Path::from_flat(values) {
            Ok(path) => path,
            Err(err) => {
                surface
                    .diagnostics()
                    .report(Diagnostic::MalformedPath { len: values.len() });
                return Err(err);
            }
        };
        self.render(surface.backend_mut(), color, alpha, &path);
        Ok(())
    }

    /// Replay `path`, auto-closed, on a drawing capability.
    pub fn render(&self, target: &mut dyn DrawingSurface, color: Color, alpha: f64, path: &Path) {
        let (stroke, fill) = self.style.resolve(color, alpha);
        let closed = path.auto_closed();
        let mut vertices = closed.vertices().iter();

        target.begin_path();
        target.set_stroke_style(stroke);
        target.set_fill_style(fill);

        if let Some(&(x, y)) = vertices.next() {
            target.move_to(x, y);
        }
        for &(x, y) in vertices {
            target.line_to(x, y);
        }

        target.stroke();
        target.fill();
    }
}
