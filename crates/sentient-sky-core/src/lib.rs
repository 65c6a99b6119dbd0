//! Core types for the sentient-sky starfield.
//!
//! Everything here is independent of the host that eventually puts pixels
//! on screen: colors, points, the logical surface and the [`DrawContext`]
//! trait the simulation draws through.

mod color;
mod draw;
mod geometry;
mod surface;

pub use color::Rgba;
pub use draw::{ColorStop, DrawContext, RadialGradient};
pub use geometry::Point;
pub use surface::{MAX_PIXEL_RATIO, Surface, Viewport};
