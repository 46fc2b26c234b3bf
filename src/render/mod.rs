//! Rendering primitives: colors, sinks, the offscreen grid, text clipping.

pub mod color;
pub mod grid;
pub mod sink;
pub mod text;

pub use color::{Color, ColorPair};
pub use grid::{Cell, CellGrid};
pub use sink::DisplaySink;
