// filepath: src/lib.rs
pub mod color;
pub mod config;
pub mod coords;
pub mod diagnostics;
pub mod draw;
pub mod error;
pub mod path;
pub mod pointer;
pub mod routine;
pub mod routines;
pub mod sandbox;
pub mod surface;

// Re-export for routine authors
pub use crate::color::{Color, ColorInput};
pub use crate::draw::{DrawingSurface, RasterSurface};
pub use crate::error::DrawError;
pub use crate::routine::{DrawContext, Routine, RoutineCreateFn};
pub use crate::sandbox::Sandbox;
pub use crate::surface::PixelSurface;
