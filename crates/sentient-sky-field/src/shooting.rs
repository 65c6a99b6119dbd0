//! The rare shooting star streak.

use rand::Rng;
use sentient_sky_core::{Point, Surface};

/// Frames a shooting star lives before it is discarded.
pub const MAX_LIFE: u32 = 60;

/// Streak length, in frames of travel behind the head.
pub const TRAIL_LENGTH: f64 = 6.0;

/// Vertical spawn position, above the top edge.
const SPAWN_Y: f64 = -50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    pub position: Point,
    /// Displacement per frame.
    pub velocity: Point,
    /// Frames elapsed since spawning.
    pub life: u32,
    pub max_life: u32,
}

impl ShootingStar {
    /// A new streak entering somewhere over the left 70% of the surface.
    pub fn spawn<R: Rng>(surface: &Surface, rng: &mut R) -> Self {
        let span = surface.width() * 0.7;
        let x = if span > 0.0 {
            rng.gen_range(0.0..span)
        } else {
            0.0
        };
        Self {
            position: Point::new(x, SPAWN_Y),
            velocity: Point::new(rng.gen_range(6.0..8.0), rng.gen_range(4.0..6.0)),
            life: 0,
            max_life: MAX_LIFE,
        }
    }

    /// Age one frame and move along the velocity.
    pub fn advance(&mut self) {
        self.life += 1;
        self.position = self.position + self.velocity;
    }

    /// Normalized age.
    pub fn progress(&self) -> f64 {
        self.life as f64 / self.max_life as f64
    }

    /// Fade-in then fade-out envelope. Negative once past `max_life`.
    pub fn alpha(&self) -> f64 {
        let t = self.progress();
        (t * 1.5).min(1.0) * (1.0 - t)
    }

    pub fn is_expired(&self) -> bool {
        self.life > self.max_life
    }

    /// End of the trailing streak.
    pub fn tail(&self) -> Point {
        self.position - self.velocity * TRAIL_LENGTH
    }
}
