//! Logical drawing surface derived from the host viewport.

use crate::draw::DrawContext;

/// Upper bound applied to the host's device pixel ratio.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// What the host reports about its display area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Device pixels per logical unit.
    pub pixel_ratio: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }
}

/// Logical surface dimensions plus the scale used to reach device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    width: f64,
    height: f64,
    dpr: f64,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        let mut surface = Self {
            width: 0.0,
            height: 0.0,
            dpr: 1.0,
        };
        surface.resize(viewport);
        surface
    }

    /// Recompute the dimensions from a viewport. Idempotent.
    pub fn resize(&mut self, viewport: Viewport) {
        let ratio = if viewport.pixel_ratio.is_finite() && viewport.pixel_ratio > 0.0 {
            viewport.pixel_ratio
        } else {
            1.0
        };
        self.dpr = ratio.min(MAX_PIXEL_RATIO);
        self.width = viewport.width.max(0.0);
        self.height = viewport.height.max(0.0);
    }

    /// Resize the backing store of `ctx` and install the logical-units transform.
    pub fn apply<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        let (pw, ph) = self.backing_size();
        ctx.resize_backing(pw, ph);
        ctx.set_transform(self.dpr);
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Size of the backing store in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr) as u32,
            (self.height * self.dpr) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_ratio_is_capped() {
        let surface = Surface::new(Viewport::new(800.0, 600.0, 3.0));
        assert_eq!(surface.dpr(), 2.0);
        assert_eq!(surface.backing_size(), (1600, 1200));
    }

    #[test]
    fn test_fractional_ratio_backing_size() {
        let surface = Surface::new(Viewport::new(801.0, 600.0, 1.5));
        assert_eq!(surface.dpr(), 1.5);
        assert_eq!(surface.backing_size(), (1201, 900));
    }

    #[test]
    fn test_invalid_ratio_falls_back_to_one() {
        for ratio in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let surface = Surface::new(Viewport::new(100.0, 50.0, ratio));
            assert_eq!(surface.dpr(), 1.0);
        }
    }

    #[test]
    fn test_resize_is_idempotent() {
        let viewport = Viewport::new(320.0, 200.0, 2.0);
        let mut surface = Surface::new(Viewport::new(10.0, 10.0, 1.0));
        surface.resize(viewport);
        let once = surface;
        surface.resize(viewport);
        assert_eq!(surface, once);
        assert_eq!(surface.width(), 320.0);
        assert_eq!(surface.height(), 200.0);
    }
}
