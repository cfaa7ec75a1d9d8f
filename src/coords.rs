// filepath: src/coords.rs
//! Screen to surface coordinate mapping

use serde::{Deserialize, Serialize};

use crate::error::DrawError;

pub const DEFAULT_ZOOM: u32 = 4;

/// Screen position of the surface's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceOffset {
    pub left: f64,
    pub top: f64,
}

/// Map a screen point onto integer surface coordinates.
///
/// No bounds are enforced; the result may lie outside the surface.
pub fn to_surface_coords(screen_x: f64, screen_y: f64, offset: SurfaceOffset, zoom: u32) -> (i32, i32) {
    let zoom = zoom as f64;
    let x = ((screen_x - offset.left) / zoom).floor();
    let y = ((screen_y - offset.top) / zoom).floor();
    (x as i32, y as i32)
}

/// Offset and zoom captured once from the host layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    offset: SurfaceOffset,
    zoom: u32,
}

impl CoordinateMapper {
    pub fn new(offset: SurfaceOffset, zoom: u32) -> Result<Self, DrawError> {
        if zoom == 0 {
            return Err(DrawError::InvalidConfig("zoom must be at least 1".into()));
        }
        Ok(Self { offset, zoom })
    }

    pub fn offset(&self) -> SurfaceOffset {
        self.offset
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn map(&self, screen_x: f64, screen_y: f64) -> (i32, i32) {
        to_surface_coords(screen_x, screen_y, self.offset, self.zoom)
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            offset: SurfaceOffset::default(),
            zoom: DEFAULT_ZOOM,
        }
    }
}
