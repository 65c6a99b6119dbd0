//! Star layer configuration and one-time star generation.

use std::f64::consts::TAU;

use rand::Rng;
use sentient_sky_core::{Point, Surface};

/// Generation parameters shared by every star of one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerConfig {
    pub name: &'static str,
    pub count: usize,
    pub size: f64,
    pub alpha: f64,
    pub drift: f64,
}

/// The three depth layers, farthest first.
pub const LAYERS: [LayerConfig; 3] = [
    LayerConfig {
        name: "Infinite",
        count: 420,
        size: 0.6,
        alpha: 0.35,
        drift: 0.002,
    },
    LayerConfig {
        name: "Awareness",
        count: 140,
        size: 1.2,
        alpha: 0.55,
        drift: 0.006,
    },
    LayerConfig {
        name: "Presence",
        count: 18,
        size: 1.8,
        alpha: 0.75,
        drift: 0.01,
    },
];

/// A single twinkling star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Position at creation. Never moved, only offset by parallax.
    pub position: Point,
    /// Radius in logical units.
    pub radius: f64,
    /// Brightness the twinkle oscillates under.
    pub base_alpha: f64,
    /// Brightness for the current frame.
    pub alpha: f64,
    /// Twinkle phase in radians.
    pub phase: f64,
    /// Phase increment per frame.
    pub drift: f64,
}

impl Star {
    fn random<R: Rng>(layer: &LayerConfig, surface: &Surface, rng: &mut R) -> Self {
        Self {
            position: Point::new(
                uniform(rng, 0.0, surface.width()),
                uniform(rng, 0.0, surface.height()),
            ),
            radius: layer.size * rng.gen_range(0.7..1.3),
            base_alpha: layer.alpha * rng.gen_range(0.6..1.0),
            alpha: layer.alpha,
            phase: rng.gen_range(0.0..TAU),
            drift: layer.drift * rng.gen_range(0.4..1.4),
        }
    }

    /// Advance the twinkle one frame and recompute `alpha`.
    pub fn twinkle(&mut self) {
        self.phase += self.drift;
        self.alpha = self.base_alpha * (0.9 + self.phase.sin() * 0.1);
    }
}

/// Uniform draw in `[low, high)` that tolerates an empty range.
fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Create every star of every layer within the current surface bounds.
pub fn generate_layers<R: Rng>(surface: &Surface, rng: &mut R) -> [Vec<Star>; 3] {
    LAYERS.map(|layer| {
        (0..layer.count)
            .map(|_| Star::random(&layer, surface, rng))
            .collect()
    })
}
