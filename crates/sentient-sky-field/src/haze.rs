//! Static atmospheric glow behind the stars.

use sentient_sky_core::{Point, RadialGradient, Rgba, Surface};

/// Opacity of the glow at the surface center.
const HAZE_ALPHA: f64 = 0.015;

/// Radial haze centered on the surface, fading out at `max(w, h)`.
pub fn haze(surface: &Surface) -> RadialGradient {
    let (w, h) = (surface.width(), surface.height());
    RadialGradient::new(Point::new(w / 2.0, h / 2.0), 0.0, w.max(h))
        .with_stop(0.0, Rgba::white(HAZE_ALPHA))
        .with_stop(1.0, Rgba::TRANSPARENT)
}
