//! Night sky simulation state.

use std::time::Duration;

use rand::rngs::StdRng;
use sentient_sky_core::{DrawContext, Point, Rgba, Surface, Viewport};
use tracing::debug;

use crate::haze::haze;
use crate::layers::{Star, generate_layers};
use crate::parallax::Parallax;
use crate::shooting::ShootingStar;
use crate::timer::{RepeatingTimer, TimerHandle};

/// Stroke width of the shooting star streak.
const STREAK_WIDTH: f64 = 1.0;

/// Everything the starfield renderer owns.
///
/// The host feeds it viewport, pointer and clock events, then calls
/// [`update`](SkyState::update) followed by [`render`](SkyState::render)
/// once per frame.
#[derive(Debug)]
pub struct SkyState {
    surface: Surface,
    /// Star layers, farthest first.
    layers: [Vec<Star>; 3],
    shooting_star: Option<ShootingStar>,
    parallax: Parallax,
    spawner: RepeatingTimer,
    rng: StdRng,
}

impl SkyState {
    /// Create the sky and place every star within `viewport`.
    pub fn new(viewport: Viewport, mut rng: StdRng) -> Self {
        let surface = Surface::new(viewport);
        let layers = generate_layers(&surface, &mut rng);
        Self {
            surface,
            layers,
            shooting_star: None,
            parallax: Parallax::default(),
            spawner: RepeatingTimer::shooting_star(),
            rng,
        }
    }

    /// Track a new viewport. Stars keep the positions they were born with.
    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        debug!(
            width = self.surface.width(),
            height = self.surface.height(),
            dpr = self.surface.dpr(),
            "surface resized"
        );
    }

    /// Point the parallax at a pointer position in logical coordinates.
    pub fn pointer_moved(&mut self, pointer: Point) {
        self.parallax.point_at(pointer, &self.surface);
    }

    /// Run the spawn timer against the elapsed time since start. Returns
    /// whether a shooting star was spawned.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.spawner.poll(now, &mut self.rng) {
            return false;
        }
        self.spawn_shooting_star();
        if let Some(next) = self.spawner.due() {
            debug!(next_ms = next.as_millis() as u64, "next shooting star scheduled");
        }
        true
    }

    /// Launch a shooting star, replacing any still in flight.
    pub fn spawn_shooting_star(&mut self) {
        let star = ShootingStar::spawn(&self.surface, &mut self.rng);
        debug!(x = star.position.x, vx = star.velocity.x, vy = star.velocity.y, "shooting star");
        self.shooting_star = Some(star);
    }

    /// Advance the simulation by one frame.
    pub fn update(&mut self) {
        self.parallax.ease();

        for star in self.layers.iter_mut().flatten() {
            star.twinkle();
        }

        if let Some(star) = self.shooting_star.as_mut() {
            star.advance();
        }
        if self
            .shooting_star
            .as_ref()
            .is_some_and(ShootingStar::is_expired)
        {
            self.shooting_star = None;
        }
    }

    /// Draw the current state onto `ctx`.
    pub fn render<C: DrawContext + ?Sized>(&self, ctx: &mut C) {
        let (w, h) = (self.surface.width(), self.surface.height());
        ctx.clear(w, h);
        ctx.fill_radial_gradient(&haze(&self.surface), w, h);

        for (depth, stars) in self.layers.iter().enumerate() {
            let offset = self.parallax.layer_offset(depth);
            for star in stars {
                ctx.fill_circle(star.position + offset, star.radius, Rgba::white(star.alpha));
            }
        }

        if let Some(star) = &self.shooting_star {
            ctx.stroke_line(
                star.position,
                star.tail(),
                STREAK_WIDTH,
                Rgba::white(star.alpha() * 0.5),
            );
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn layers(&self) -> &[Vec<Star>; 3] {
        &self.layers
    }

    pub fn shooting_star(&self) -> Option<&ShootingStar> {
        self.shooting_star.as_ref()
    }

    pub fn parallax(&self) -> &Parallax {
        &self.parallax
    }

    /// Handle that stops future shooting stars when cancelled.
    pub fn spawner_handle(&self) -> TimerHandle {
        self.spawner.handle()
    }
}
