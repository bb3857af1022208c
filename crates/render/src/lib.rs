//! Heatrail Rendering
//!
//! Turns a windowed slice of a cursor trail into a heatmap overlay:
//! - [`DensityFieldBuilder`]: splat + blur a trail slice into a scalar
//!   density field at frame resolution
//! - [`colormap`]: explicit lookup tables for the supported palettes
//! - [`composite`]: normalize, color-map, and alpha-blend a field onto a
//!   video frame
//!
//! Everything here is pure computation: fields are recomputed per query
//! and discarded after compositing, so callers can re-render freely with
//! different parameters against the same immutable trail.

pub mod colormap;
pub mod compositor;
pub mod density;

pub use compositor::composite;
pub use density::{DensityField, DensityFieldBuilder};
