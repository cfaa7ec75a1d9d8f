// filepath: src/routines/diagonal.rs
//! Diagonal demo routine
//!
//! Sets pixel (i, i) to a random opaque color for every i in `start..end`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::DrawError;
use crate::routine::{DrawContext, Routine};

pub struct DiagonalRoutine {
    id: String,
    name: String,
    start: i32,
    end: i32,
    seed: Option<u64>,
}

impl DiagonalRoutine {
    pub fn new() -> Self {
        Self {
            id: "diagonal".to_string(),
            name: "Random diagonal".to_string(),
            start: 20,
            end: 100,
            seed: None,
        }
    }

    pub fn create() -> Box<dyn Routine> {
        Box::new(Self::new())
    }
}

impl Default for DiagonalRoutine {
    fn default() -> Self {
        Self::new()
    }
}

impl Routine for DiagonalRoutine {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, config: &toml::Table) -> Result<(), Box<dyn std::error::Error>> {
        let int = |key: &str| config.get(key).and_then(|v| v.as_integer());
        let out_of_range = |key: &str, v: i64| {
            DrawError::InvalidConfig(format!("diagonal.{}: {} is out of range", key, v))
        };

        if let Some(start) = int("start") {
            self.start = i32::try_from(start).map_err(|_| out_of_range("start", start))?;
        }
        if let Some(end) = int("end") {
            self.end = i32::try_from(end).map_err(|_| out_of_range("end", end))?;
        }
        if let Some(seed) = int("seed") {
            self.seed = Some(u64::try_from(seed).map_err(|_| out_of_range("seed", seed))?);
        }
        Ok(())
    }

    fn main(&mut self, ctx: &mut DrawContext) -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut c = ctx.color(255.0, 255.0, 255.0, 1.0);
        for i in self.start..self.end {
            c = ctx.color(
                (rng.gen::<f64>() * 255.0).round(),
                (rng.gen::<f64>() * 255.0).round(),
                (rng.gen::<f64>() * 255.0).round(),
                c.a,
            );
            ctx.set_pixel(i, i, c);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DiagonalRoutine;
    use crate::color::Color;
    use crate::diagnostics::LogSink;
    use crate::draw::RasterSurface;
    use crate::path::PathRenderer;
    use crate::routine::{DrawContext, Routine};
    use crate::surface::PixelSurface;
    use std::rc::Rc;

    fn run_seeded(seed: i64) -> PixelSurface {
        let mut surface = PixelSurface::new(
            Box::new(RasterSurface::new(128, 128)),
            Color::BLACK,
            Rc::new(LogSink),
        );
        let renderer = PathRenderer::default();
        let mut routine = DiagonalRoutine::new();
        let cfg: toml::Table = toml::from_str(&format!("seed = {}", seed)).unwrap();
        routine.init(&cfg).unwrap();
        routine
            .main(&mut DrawContext::new(&mut surface, &renderer))
            .unwrap();
        surface
    }

    #[test]
    fn same_seed_paints_same_diagonal() {
        let a = run_seeded(7);
        let b = run_seeded(7);
        for i in 20..100 {
            assert_eq!(a.get_pixel(i, i), b.get_pixel(i, i));
            assert_eq!(a.get_pixel(i, i).a, 1.0);
        }
    }

    #[test]
    fn only_the_diagonal_is_touched() {
        let surface = run_seeded(1);
        assert_eq!(surface.get_pixel(19, 19), Color::BLACK);
        assert_eq!(surface.get_pixel(100, 100), Color::BLACK);
        assert_eq!(surface.get_pixel(21, 20), Color::BLACK);
    }

    #[test]
    fn range_past_the_edge_is_clipped() {
        let mut surface = PixelSurface::new(
            Box::new(RasterSurface::new(16, 16)),
            Color::BLACK,
            Rc::new(LogSink),
        );
        let renderer = PathRenderer::default();
        let mut routine = DiagonalRoutine::new();
        let cfg: toml::Table = toml::from_str("start = 10\nend = 40\nseed = 3").unwrap();
        routine.init(&cfg).unwrap();
        assert!(routine
            .main(&mut DrawContext::new(&mut surface, &renderer))
            .is_ok());
        assert_eq!(surface.get_pixel(15, 15).a, 1.0);
    }

    #[test]
    fn out_of_range_settings_are_rejected() {
        for cfg in ["start = 3000000000", "end = -3000000000", "seed = -1"] {
            let mut routine = DiagonalRoutine::new();
            let cfg: toml::Table = toml::from_str(cfg).unwrap();
            let err = routine.init(&cfg).unwrap_err();
            assert!(err.to_string().contains("out of range"), "{}", err);
        }
    }
}
