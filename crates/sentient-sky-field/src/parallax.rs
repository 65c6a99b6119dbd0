//! Pointer-driven parallax offset with exponential easing.

use sentient_sky_core::{Point, Surface};

/// Fraction of the remaining distance covered each frame.
pub const EASING: f64 = 0.02;

/// Full span of the target offset across the surface; targets lie in
/// `[-POINTER_RANGE / 2, POINTER_RANGE / 2]`.
pub const POINTER_RANGE: f64 = 6.0;

/// Offset applied per unit of layer depth.
const DEPTH_WEIGHT: f64 = 0.15;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Parallax {
    /// Where the pointer says the offset should be.
    pub target: Point,
    /// Smoothed offset actually applied.
    pub current: Point,
}

impl Parallax {
    /// Map a pointer position in logical surface coordinates to a new target.
    pub fn point_at(&mut self, pointer: Point, surface: &Surface) {
        if surface.width() <= 0.0 || surface.height() <= 0.0 {
            return;
        }
        self.target = Point::new(
            (pointer.x / surface.width() - 0.5) * POINTER_RANGE,
            (pointer.y / surface.height() - 0.5) * POINTER_RANGE,
        );
    }

    /// One frame of easing toward the target.
    pub fn ease(&mut self) {
        self.current = self.current + (self.target - self.current) * EASING;
    }

    /// Offset for stars in layer `index` (0 is the farthest).
    pub fn layer_offset(&self, index: usize) -> Point {
        self.current * ((index + 1) as f64 * DEPTH_WEIGHT)
    }
}
