//! Parallax starfield rendering for sentient-sky.
//!
//! This crate owns the whole night-sky simulation: three twinkling star
//! layers, a rare shooting star on a repeating timer and a pointer-driven
//! parallax offset. It draws through [`sentient_sky_core::DrawContext`] and
//! never touches a terminal or window itself.

mod haze;
mod layers;
mod parallax;
mod shooting;
mod state;
mod timer;

pub use layers::{LAYERS, LayerConfig, Star, generate_layers};
pub use parallax::{EASING, POINTER_RANGE, Parallax};
pub use shooting::{MAX_LIFE, ShootingStar, TRAIL_LENGTH};
pub use state::SkyState;
pub use timer::{FIRST_SPAWN, RepeatingTimer, SPAWN_DELAY_MS, TimerHandle};
