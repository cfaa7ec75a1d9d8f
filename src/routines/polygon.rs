// filepath: src/routines/polygon.rs
//! Polygon demo routine
//!
//! Draws one translucent polygon, a red triangle unless configured otherwise.

use crate::color::Color;
use crate::error::DrawError;
use crate::routine::{DrawContext, Routine};

pub struct PolygonRoutine {
    id: String,
    name: String,
    color: u32,
    alpha: f64,
    points: Vec<f64>,
}

impl PolygonRoutine {
    pub fn new() -> Self {
        Self {
            id: "polygon".to_string(),
            name: "Polygon".to_string(),
            color: 0xff0000,
            alpha: 0.5,
            points: vec![20.0, 20.0, 200.0, 80.0, 60.0, 220.0],
        }
    }

    pub fn create() -> Box<dyn Routine> {
        Box::new(Self::new())
    }
}

impl Default for PolygonRoutine {
    fn default() -> Self {
        Self::new()
    }
}

fn as_number(value: &toml::Value) -> Option<f64> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|v| v as f64))
}

impl Routine for PolygonRoutine {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, config: &toml::Table) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(color) = config.get("color").and_then(|v| v.as_integer()) {
            self.color = (color & 0xff_ffff) as u32;
        }

        if let Some(alpha) = config.get("alpha").and_then(as_number) {
            self.alpha = alpha;
        }

        if let Some(points) = config.get("points") {
            let values = points
                .as_array()
                .ok_or_else(|| DrawError::InvalidConfig("polygon.points must be an array".into()))?;
            self.points = values
                .iter()
                .map(|v| {
                    as_number(v).ok_or_else(|| {
                        DrawError::InvalidConfig(format!("polygon.points: {} is not a number", v))
                    })
                })
                .collect::<Result<Vec<f64>, DrawError>>()?;
        }

        Ok(())
    }

    fn main(&mut self, ctx: &mut DrawContext) -> Result<(), Box<dyn std::error::Error>> {
        ctx.add_poly(Color::from_hex(self.color), self.alpha, &self.points)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PolygonRoutine;
    use crate::color::Color;
    use crate::diagnostics::LogSink;
    use crate::draw::RasterSurface;
    use crate::path::PathRenderer;
    use crate::routine::{DrawContext, Routine};
    use crate::surface::PixelSurface;
    use std::rc::Rc;

    fn surface() -> PixelSurface {
        PixelSurface::new(
            Box::new(RasterSurface::new(320, 240)),
            Color::BLACK,
            Rc::new(LogSink),
        )
    }

    #[test]
    fn default_draws_half_red_triangle() {
        let mut surface = surface();
        let renderer = PathRenderer::default();
        let mut routine = PolygonRoutine::new();
        routine
            .main(&mut DrawContext::new(&mut surface, &renderer))
            .unwrap();

        let c = surface.get_pixel(80, 80);
        assert_eq!((c.r, c.g, c.b), (128, 0, 0));
    }

    #[test]
    fn config_overrides_shape_and_paint() {
        let mut routine = PolygonRoutine::new();
        let cfg: toml::Table = toml::from_str(
            "color = 0x00ff00\nalpha = 1\npoints = [0, 0, 10, 0, 10, 10, 0, 10]",
        )
        .unwrap();
        routine.init(&cfg).unwrap();

        let mut surface = surface();
        let renderer = PathRenderer::default();
        routine
            .main(&mut DrawContext::new(&mut surface, &renderer))
            .unwrap();
        assert_eq!(surface.get_pixel(5, 5), Color::from_hex(0x00ff00));
        assert_eq!(surface.get_pixel(50, 50), Color::BLACK);
    }

    #[test]
    fn malformed_points_fail_the_run() {
        let mut routine = PolygonRoutine::new();
        let cfg: toml::Table = toml::from_str("points = [0, 0, 10]").unwrap();
        routine.init(&cfg).unwrap();

        let mut surface = surface();
        let renderer = PathRenderer::default();
        assert!(routine
            .main(&mut DrawContext::new(&mut surface, &renderer))
            .is_err());
    }
}
