//! Alpha-blended colors.

/// An 8-bit RGB color with a floating point alpha, the way a 2D canvas
/// spells `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity. Not clamped here; drawing backends clamp to `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// White at the given opacity.
    pub const fn white(a: f64) -> Self {
        Self::new(255, 255, 255, a)
    }

    /// Opacity clamped into the drawable range. NaN counts as transparent.
    pub fn clamped_alpha(&self) -> f64 {
        if self.a.is_nan() {
            0.0
        } else {
            self.a.clamp(0.0, 1.0)
        }
    }

    /// Perceived brightness of the color channels in `[0, 1]`, alpha ignored.
    pub fn luminance(&self) -> f64 {
        (2126 * self.r as u32 + 7152 * self.g as u32 + 722 * self.b as u32) as f64 / 2_550_000.0
    }

    /// Linear interpolation between two colors, channel by channel.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}
