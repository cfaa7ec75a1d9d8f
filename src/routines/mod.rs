// filepath: src/routines/mod.rs
//! Built-in routines for the pixel sandbox

pub mod diagonal;
pub mod polygon;

// Re-export all routines for convenience
pub use diagonal::DiagonalRoutine;
pub use polygon::PolygonRoutine;
