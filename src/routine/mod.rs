// filepath: src/routine/mod.rs
//! Routine system for the pixel sandbox
//!
//! Re-exports the routine trait, the drawing context and the registry that
//! creates routines by id.

pub mod interface;
mod registry;

pub use interface::{DrawContext, Routine, RoutineCreateFn};
pub use registry::RoutineRegistry;
