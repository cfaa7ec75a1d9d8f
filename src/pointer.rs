// filepath: src/pointer.rs
//! Pointer (mouse) event handling for the pixel inspector
//!
//! Hovering the surface shows the pixel under the pointer; clicking logs it.

use log::{debug, info};

use crate::color::Color;
use crate::coords::CoordinateMapper;
use crate::surface::PixelSurface;

/// Horizontal gap between the pointer and the inspector overlay.
pub const OVERLAY_GAP: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEventKind {
    Enter,
    Leave,
    Motion,
    Click,
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub screen_x: f64,
    pub screen_y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, screen_x: f64, screen_y: f64) -> Self {
        Self {
            kind,
            screen_x,
            screen_y,
        }
    }
}

/// One inspected pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub x: i32,
    pub y: i32,
    pub color: Color,
    pub hex: String,
}

impl Reading {
    fn take(surface: &PixelSurface, x: i32, y: i32) -> Self {
        let color = surface.get_pixel(x, y);
        Self {
            x,
            y,
            color,
            hex: color.to_hex(),
        }
    }
}

/// State behind the hover overlay. Drawing the overlay is up to the host.
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    visible: bool,
    reading: Option<Reading>,
    anchor: (f64, f64),
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last pixel read by a motion or click
    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    /// Screen position for the overlay's top-left corner
    pub fn anchor(&self) -> (f64, f64) {
        self.anchor
    }

    /// Apply one pointer event. Returns the reading taken, if any.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        mapper: &CoordinateMapper,
        surface: &PixelSurface,
    ) -> Option<Reading> {
        match event.kind {
            PointerEventKind::Enter => {
                debug!(
                    "Pointer entered surface at ({:.2}, {:.2})",
                    event.screen_x, event.screen_y
                );
                self.visible = true;
                None
            }
            PointerEventKind::Leave => {
                debug!("Pointer left surface");
                self.visible = false;
                None
            }
            PointerEventKind::Motion => {
                let (x, y) = mapper.map(event.screen_x, event.screen_y);
                let reading = Reading::take(surface, x, y);
                self.anchor = (event.screen_x + OVERLAY_GAP, event.screen_y);
                self.reading = Some(reading.clone());
                Some(reading)
            }
            PointerEventKind::Click => {
                let (x, y) = mapper.map(event.screen_x, event.screen_y);
                let reading = Reading::take(surface, x, y);
                info!(
                    "{{ x: {}, y: {}, r: {}, g: {}, b: {}, c: {} }}",
                    reading.x, reading.y, reading.color.r, reading.color.g, reading.color.b, reading.hex
                );
                self.reading = Some(reading.clone());
                Some(reading)
            }
        }
    }
}
